use itertools::Itertools;

use crate::internal::*;

/// Removes dimensions of size one from a tensor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, new)]
pub struct Squeeze {
    /// Dimensions to remove. `None` removes every dimension of size one, and
    /// is never encoded as an empty list.
    pub squeeze_dims: Option<TVec<i64>>,
}

impl Squeeze {
    pub fn squeeze_all(&self) -> bool {
        self.squeeze_dims.is_none()
    }
}

impl OpStat for Squeeze {
    const NAME: &'static str = "Squeeze";
    const VERSION: &'static str = "opset1";
    const IN_PORTS_COUNT: usize = 2;
    const OUT_PORTS_COUNT: usize = 1;

    fn from_attrs(attrs: &OpAttrs) -> Option<&Self> {
        match attrs {
            OpAttrs::Squeeze(op) => Some(op),
            _ => None,
        }
    }

    fn into_attrs(self) -> OpAttrs {
        OpAttrs::Squeeze(self)
    }

    fn validate(&self) -> FrontResult<()> {
        ensure!(
            self.squeeze_dims.as_ref().is_none_or(|dims| !dims.is_empty()),
            "squeeze_dims must be unset rather than empty"
        );
        Ok(())
    }
}

impl fmt::Display for Squeeze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.squeeze_dims {
            Some(dims) => write!(f, "Squeeze(squeeze_dims: [{}])", dims.iter().join(", ")),
            None => write!(f, "Squeeze(squeeze_dims: unset)"),
        }
    }
}
