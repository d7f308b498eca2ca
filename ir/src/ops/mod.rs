use crate::internal::*;

pub mod squeeze;
pub mod unsqueeze;

/// Typed attribute set of an extracted node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OpAttrs {
    Squeeze(Squeeze),
    Unsqueeze(Unsqueeze),
}

impl OpAttrs {
    pub fn name(&self) -> &'static str {
        match self {
            OpAttrs::Squeeze(_) => Squeeze::NAME,
            OpAttrs::Unsqueeze(_) => Unsqueeze::NAME,
        }
    }

    pub fn version(&self) -> &'static str {
        match self {
            OpAttrs::Squeeze(_) => Squeeze::VERSION,
            OpAttrs::Unsqueeze(_) => Unsqueeze::VERSION,
        }
    }

    pub fn in_ports_count(&self) -> usize {
        match self {
            OpAttrs::Squeeze(_) => Squeeze::IN_PORTS_COUNT,
            OpAttrs::Unsqueeze(_) => Unsqueeze::IN_PORTS_COUNT,
        }
    }

    pub fn out_ports_count(&self) -> usize {
        match self {
            OpAttrs::Squeeze(_) => Squeeze::OUT_PORTS_COUNT,
            OpAttrs::Unsqueeze(_) => Unsqueeze::OUT_PORTS_COUNT,
        }
    }
}

impl fmt::Display for OpAttrs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OpAttrs::Squeeze(op) => fmt::Display::fmt(op, f),
            OpAttrs::Unsqueeze(op) => fmt::Display::fmt(op, f),
        }
    }
}

/// Static description of an operation, and the merge of its typed attributes
/// onto a host node.
pub trait OpStat: fmt::Debug + fmt::Display + Clone + Sized {
    const NAME: &'static str;
    const VERSION: &'static str;
    const IN_PORTS_COUNT: usize;
    const OUT_PORTS_COUNT: usize;

    fn from_attrs(attrs: &OpAttrs) -> Option<&Self>;

    fn into_attrs(self) -> OpAttrs;

    fn validate(&self) -> FrontResult<()> {
        Ok(())
    }

    /// Annotates `node` with `attrs`, replacing a previous attribute set of
    /// the same operation. Fails, leaving the node untouched, if the node
    /// already carries the attributes of another operation.
    fn update_node_stat(node: &mut Node, attrs: Self) -> FrontResult<()> {
        if let Some(existing) = node.op() {
            if Self::from_attrs(existing).is_none() {
                bail!(
                    "Node {} ({}): can not set {} attributes, node is already a {}",
                    node.name,
                    node.op_type,
                    Self::NAME,
                    existing.name()
                )
            }
        }
        attrs.validate().with_context(|| format!("Node {} ({})", node.name, node.op_type))?;
        trace!("Node {} ({}): {}", node.name, node.op_type, attrs);
        node.op = Some(attrs.into_attrs());
        Ok(())
    }
}

/// Maps an empty sequence to `None`, anything else to `Some(sequence)` with
/// the order preserved.
///
/// Extractors of optional list attributes use this so that an empty list never
/// reaches the host node: downstream code can tell "no list" from "this list".
pub fn normalize_optional_sequence<T, I>(raw: I) -> Option<TVec<T>>
where
    I: IntoIterator<Item = T>,
{
    let seq: TVec<T> = raw.into_iter().collect();
    if seq.is_empty() { None } else { Some(seq) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::*;

    #[test]
    fn normalize_empty_is_none() {
        assert_eq!(normalize_optional_sequence(Vec::<i64>::new()), None);
        assert_eq!(normalize_optional_sequence(std::iter::empty::<i64>()), None);
    }

    #[test]
    fn normalize_keeps_order() {
        assert_eq!(normalize_optional_sequence(vec![2i64, 0, 1]), Some(tvec!(2, 0, 1)));
    }

    #[test]
    fn update_sets_then_overwrites() {
        crate::setup_test_logger();
        let mut node = Node::new("sq", "Squeeze");
        Squeeze::update_node_stat(&mut node, Squeeze::new(Some(tvec!(1)))).unwrap();
        Squeeze::update_node_stat(&mut node, Squeeze::new(None)).unwrap();
        assert_eq!(node.op_as::<Squeeze>(), Some(&Squeeze::new(None)));
        let op = node.op().unwrap();
        assert_eq!(op.name(), "Squeeze");
        assert_eq!(op.version(), "opset1");
        assert_eq!((op.in_ports_count(), op.out_ports_count()), (2, 1));
    }

    #[test]
    fn update_rejects_other_op() {
        let mut node = Node::new("un", "Unsqueeze");
        Unsqueeze::update_node_stat(&mut node, Unsqueeze::new(tvec!(0))).unwrap();
        let err = Squeeze::update_node_stat(&mut node, Squeeze::new(None)).unwrap_err();
        assert!(err.to_string().contains("already a Unsqueeze"), "{err}");
        assert_eq!(node.op_as::<Unsqueeze>(), Some(&Unsqueeze::new(tvec!(0))));
    }

    #[test]
    fn update_rejects_invalid_attrs() {
        let mut node = Node::new("sq", "Squeeze");
        assert!(Squeeze::update_node_stat(&mut node, Squeeze::new(Some(tvec!()))).is_err());
        assert!(!node.is_extracted());
    }

    proptest! {
        #[test]
        fn normalize_non_empty_is_identity(raw in vec(any::<i64>(), 1..8)) {
            let normalized = normalize_optional_sequence(raw.clone());
            prop_assert_eq!(normalized.map(|s| s.into_vec()), Some(raw));
        }
    }
}
