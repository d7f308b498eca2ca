use itertools::Itertools;

use crate::internal::*;

/// One operator instance of the host graph.
///
/// A node is created by the front-end pass with its name, operator type and
/// connections. Its typed attribute set (`op`) stays unset until an extractor
/// annotates it through [`OpStat::update_node_stat`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Node {
    pub name: String,
    pub op_type: String,
    pub inputs: TVec<String>,
    pub outputs: TVec<String>,
    pub op: Option<OpAttrs>,
}

impl Node {
    pub fn new(name: impl Into<String>, op_type: impl Into<String>) -> Node {
        Node { name: name.into(), op_type: op_type.into(), ..Node::default() }
    }

    pub fn with_inputs<S: Into<String>>(mut self, inputs: impl IntoIterator<Item = S>) -> Node {
        self.inputs = inputs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_outputs<S: Into<String>>(mut self, outputs: impl IntoIterator<Item = S>) -> Node {
        self.outputs = outputs.into_iter().map(Into::into).collect();
        self
    }

    pub fn op(&self) -> Option<&OpAttrs> {
        self.op.as_ref()
    }

    pub fn op_as<O: OpStat>(&self) -> Option<&O> {
        self.op().and_then(O::from_attrs)
    }

    pub fn op_is<O: OpStat>(&self) -> bool {
        self.op_as::<O>().is_some()
    }

    pub fn is_extracted(&self) -> bool {
        self.op.is_some()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.op_type)?;
        if !self.inputs.is_empty() {
            write!(f, " <- [{}]", self.inputs.iter().join(", "))?;
        }
        match &self.op {
            Some(op) => write!(f, " {op}"),
            None => write!(f, " <not extracted>"),
        }
    }
}
