use mofront_ir::internal::*;

use crate::model::FrontExtractor;
use crate::pb::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct UnsqueezeFrontExtractor;

impl FrontExtractor for UnsqueezeFrontExtractor {
    fn op(&self) -> &'static str {
        "Unsqueeze"
    }

    fn extract(&self, proto: &NodeProto, node: &mut Node) -> FrontResult<bool> {
        let axes = proto.get_attr_ints_or("axes", vec![])?;
        Unsqueeze::update_node_stat(node, Unsqueeze::new(axes.into()))?;
        Ok(true)
    }
}
