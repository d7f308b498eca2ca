use itertools::Itertools;

use crate::internal::*;

/// Inserts dimensions of size one into a tensor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, new)]
pub struct Unsqueeze {
    /// Empty when the axes come from the second input.
    pub unsqueeze_dims: TVec<i64>,
}

impl OpStat for Unsqueeze {
    const NAME: &'static str = "Unsqueeze";
    const VERSION: &'static str = "opset1";
    const IN_PORTS_COUNT: usize = 2;
    const OUT_PORTS_COUNT: usize = 1;

    fn from_attrs(attrs: &OpAttrs) -> Option<&Self> {
        match attrs {
            OpAttrs::Unsqueeze(op) => Some(op),
            _ => None,
        }
    }

    fn into_attrs(self) -> OpAttrs {
        OpAttrs::Unsqueeze(self)
    }
}

impl fmt::Display for Unsqueeze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unsqueeze(unsqueeze_dims: [{}])", self.unsqueeze_dims.iter().join(", "))
    }
}
