use mofront_ir::internal::*;

use crate::model::FrontExtractor;
use crate::pb::*;

/// Reads the optional `axes` list of a Squeeze node into `squeeze_dims`.
///
/// An absent or empty list leaves `squeeze_dims` unset (squeeze every
/// dimension of size one). From opset 13 on, axes come as a second input and
/// the attribute is absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqueezeFrontExtractor;

impl FrontExtractor for SqueezeFrontExtractor {
    fn op(&self) -> &'static str {
        "Squeeze"
    }

    fn extract(&self, proto: &NodeProto, node: &mut Node) -> FrontResult<bool> {
        let axes = proto.get_attr_ints_or("axes", vec![])?;
        if axes.is_empty() && proto.input.len() > 1 {
            trace!("Node {}: squeeze axes given as input {}", node.name, proto.input[1]);
        }
        Squeeze::update_node_stat(node, Squeeze::new(normalize_optional_sequence(axes)))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pb_helpers::node;
    use proptest::collection::vec;
    use proptest::prelude::*;

    fn extract(proto: &NodeProto) -> FrontResult<(bool, Node)> {
        let mut node = Node::new(&proto.name, &proto.op_type);
        let handled = SqueezeFrontExtractor.extract(proto, &mut node)?;
        Ok((handled, node))
    }

    fn squeeze_dims(node: &Node) -> Option<Vec<i64>> {
        node.op_as::<Squeeze>().unwrap().squeeze_dims.as_ref().map(|d| d.to_vec())
    }

    #[test]
    fn absent_axes_are_unset() {
        crate::setup_test_logger();
        let (handled, node) = extract(&node().name("sq").op("Squeeze").input("x")).unwrap();
        assert!(handled);
        assert_eq!(squeeze_dims(&node), None);
    }

    #[test]
    fn empty_axes_are_unset() {
        let proto = node().name("sq").op("Squeeze").attr_ints("axes", &[]);
        let (handled, node) = extract(&proto).unwrap();
        assert!(handled);
        assert_eq!(squeeze_dims(&node), None);
    }

    #[test]
    fn axes_order_is_preserved() {
        for axes in [vec![0, 2], vec![2, 0]] {
            let proto = node().name("sq").op("Squeeze").attr_ints("axes", &axes);
            let (handled, extracted) = extract(&proto).unwrap();
            assert!(handled);
            assert_eq!(squeeze_dims(&extracted), Some(axes));
        }
    }

    #[test]
    fn axes_given_as_input() {
        let proto = node().name("sq").op("Squeeze").input("x").input("axes");
        let (handled, node) = extract(&proto).unwrap();
        assert!(handled);
        assert!(node.op_as::<Squeeze>().unwrap().squeeze_all());
    }

    #[test]
    fn extraction_is_idempotent() {
        let proto = node().name("sq").op("Squeeze").attr_ints("axes", &[1]);
        let mut node = Node::new("sq", "Squeeze");
        assert!(SqueezeFrontExtractor.extract(&proto, &mut node).unwrap());
        let once = node.clone();
        assert!(SqueezeFrontExtractor.extract(&proto, &mut node).unwrap());
        assert_eq!(once, node);
        assert_eq!(squeeze_dims(&node), Some(vec![1]));
    }

    #[test]
    fn axes_of_the_wrong_kind_fail() {
        let proto = node().name("sq").op("Squeeze").attr_int("axes", 1);
        let mut node = Node::new("sq", "Squeeze");
        let err = SqueezeFrontExtractor.extract(&proto, &mut node).unwrap_err();
        assert!(err.to_string().contains("attribute 'axes'"), "{err}");
        assert!(!node.is_extracted());
    }

    #[test]
    fn node_of_another_op_is_rejected() {
        let proto = node().name("sq").op("Squeeze").attr_ints("axes", &[1]);
        let mut node = Node::new("sq", "Squeeze");
        Unsqueeze::update_node_stat(&mut node, Unsqueeze::new(tvec!(1))).unwrap();
        assert!(SqueezeFrontExtractor.extract(&proto, &mut node).is_err());
        assert!(node.op_is::<Unsqueeze>());
    }

    proptest! {
        #[test]
        fn non_empty_axes_are_kept(axes in vec(any::<i64>(), 1..6)) {
            let proto = node().name("sq").op("Squeeze").attr_ints("axes", &axes);
            let (handled, node) = extract(&proto).unwrap();
            prop_assert!(handled);
            prop_assert_eq!(squeeze_dims(&node), Some(axes));
        }
    }
}
