use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use mofront_ir::internal::*;
use prost::Message;

use crate::pb;

/// Annotates a host node from one serialized ONNX node.
pub trait FrontExtractor: fmt::Debug + Send + Sync {
    /// ONNX operator type the extractor handles.
    fn op(&self) -> &'static str;

    /// Whether the extractor is active once registered.
    fn enabled(&self) -> bool {
        true
    }

    /// Returns `true` when the node has been fully handled.
    fn extract(&self, proto: &pb::NodeProto, node: &mut Node) -> FrontResult<bool>;
}

#[derive(Debug, new)]
pub struct RegisteredExtractor {
    pub extractor: Box<dyn FrontExtractor>,
    pub enabled: bool,
}

#[derive(Debug, Default)]
pub struct ExtractorRegister(pub HashMap<String, RegisteredExtractor>);

impl ExtractorRegister {
    pub fn insert(&mut self, extractor: impl FrontExtractor + 'static) {
        let op = extractor.op();
        let enabled = extractor.enabled();
        let registered = RegisteredExtractor::new(Box::new(extractor), enabled);
        if let Some(previous) = self.0.insert(op.to_string(), registered) {
            debug!("Replacing extractor for {}: {:?}", op, previous.extractor);
        }
    }

    pub fn set_enabled(&mut self, op: &str, enabled: bool) -> FrontResult<()> {
        match self.0.get_mut(op) {
            Some(registered) => {
                registered.enabled = enabled;
                Ok(())
            }
            None => bail!("No extractor registered for operator {}", op),
        }
    }

    /// The extractor for `op`, if one is registered and enabled.
    pub fn get(&self, op: &str) -> Option<&dyn FrontExtractor> {
        self.0.get(op).filter(|r| r.enabled).map(|r| &*r.extractor)
    }

    pub fn ops(&self) -> Vec<&str> {
        let mut ops: Vec<&str> = self.0.keys().map(|s| &**s).collect();
        ops.sort_unstable();
        ops
    }
}

/// Host nodes built from one ONNX graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractedGraph {
    pub name: String,
    pub nodes: Vec<Node>,
    /// Names of the nodes no enabled extractor handled.
    pub unhandled: Vec<String>,
}

impl ExtractedGraph {
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }
}

#[derive(Debug, Default)]
pub struct Onnx {
    pub op_register: ExtractorRegister,
}

impl Onnx {
    pub fn with_extractor_enabled(mut self, op: &str, enabled: bool) -> FrontResult<Onnx> {
        self.op_register.set_enabled(op, enabled)?;
        Ok(self)
    }

    /// Dispatches `proto` to the extractor registered for its operator type.
    ///
    /// Returns `false`, leaving `node` alone, when there is no enabled
    /// extractor for it.
    pub fn extract_node(&self, proto: &pb::NodeProto, node: &mut Node) -> FrontResult<bool> {
        let Some(extractor) = self.op_register.get(&proto.op_type) else {
            debug!("No extractor for {}", node);
            return Ok(false);
        };
        trace!("Extracting {} with {:?}", node.name, extractor);
        extractor
            .extract(proto, node)
            .with_context(|| format!("Extracting node {} ({})", node.name, proto.op_type))
    }

    pub fn extract_graph(&self, graph: &pb::GraphProto) -> FrontResult<ExtractedGraph> {
        let mut result = ExtractedGraph { name: graph.name.clone(), ..ExtractedGraph::default() };
        for (ix, pbnode) in graph.node.iter().enumerate() {
            let mut node = Node::new(node_name(ix, pbnode), &pbnode.op_type)
                .with_inputs(pbnode.input.iter().filter(|s| !s.is_empty()).cloned())
                .with_outputs(pbnode.output.iter().filter(|s| !s.is_empty()).cloned());
            if !self.extract_node(pbnode, &mut node)? {
                result.unhandled.push(node.name.clone());
            }
            result.nodes.push(node);
        }
        if !result.unhandled.is_empty() {
            debug!("Graph {}: unhandled nodes {:?}", result.name, result.unhandled);
        }
        Ok(result)
    }

    pub fn extract_model(&self, proto: &pb::ModelProto) -> FrontResult<ExtractedGraph> {
        if let Some(version) = proto.onnx_operator_set_version() {
            debug!("ONNX operator set version {}", version);
        }
        let graph = proto.graph.as_ref().context("Model has no graph")?;
        self.extract_graph(graph)
    }

    pub fn proto_model_for_read(&self, r: &mut dyn Read) -> FrontResult<pb::ModelProto> {
        let mut v = vec![];
        r.read_to_end(&mut v)?;
        Ok(pb::ModelProto::decode(v.as_slice())?)
    }

    pub fn proto_model_for_path(&self, p: impl AsRef<Path>) -> FrontResult<pb::ModelProto> {
        let p = p.as_ref();
        let mut r =
            std::fs::File::open(p).with_context(|| format!("Could not open {}", p.display()))?;
        self.proto_model_for_read(&mut r).with_context(|| format!("Decoding {}", p.display()))
    }

    pub fn extract_for_path(&self, p: impl AsRef<Path>) -> FrontResult<ExtractedGraph> {
        let proto = self.proto_model_for_path(p)?;
        self.extract_model(&proto)
    }
}

fn node_name(ix: usize, pbnode: &pb::NodeProto) -> String {
    if !pbnode.name.is_empty() {
        pbnode.name.clone()
    } else if let Some(output) = pbnode.output.first().filter(|s| !s.is_empty()) {
        output.clone()
    } else {
        format!("{}-{}", ix, pbnode.op_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pb_helpers::{graph, node};

    #[derive(Debug)]
    struct Marker(&'static str, bool);

    impl FrontExtractor for Marker {
        fn op(&self) -> &'static str {
            self.0
        }

        fn enabled(&self) -> bool {
            self.1
        }

        fn extract(&self, _proto: &pb::NodeProto, node: &mut Node) -> FrontResult<bool> {
            Unsqueeze::update_node_stat(node, Unsqueeze::new(tvec!()))?;
            Ok(true)
        }
    }

    #[test]
    fn register_honors_enabled_flag() {
        let mut reg = ExtractorRegister::default();
        reg.insert(Marker("On", true));
        reg.insert(Marker("Off", false));
        assert!(reg.get("On").is_some());
        assert!(reg.get("Off").is_none());
        assert!(reg.get("Missing").is_none());
        reg.set_enabled("Off", true).unwrap();
        assert!(reg.get("Off").is_some());
        assert!(reg.set_enabled("Missing", true).is_err());
        assert_eq!(reg.ops(), vec!["Off", "On"]);
    }

    #[test]
    fn insert_replaces_previous_extractor() {
        let mut reg = ExtractorRegister::default();
        reg.insert(Marker("Op", false));
        reg.insert(Marker("Op", true));
        assert_eq!(reg.0.len(), 1);
        assert!(reg.get("Op").is_some());
    }

    #[test]
    fn node_names_fall_back_on_outputs_then_index() {
        assert_eq!(node_name(3, &node().name("a").op("Relu").output("y")), "a");
        assert_eq!(node_name(3, &node().op("Relu").output("y")), "y");
        assert_eq!(node_name(3, &node().op("Relu").output("")), "3-Relu");
    }

    #[test]
    fn unknown_ops_are_left_unhandled() {
        crate::setup_test_logger();
        let mut reg = ExtractorRegister::default();
        reg.insert(Marker("Known", true));
        let onnx = Onnx { op_register: reg };
        let g = graph()
            .name("g")
            .node(node().name("k").op("Known").input("x").output("y"))
            .node(node().op("Unknown").input("y").input("").output("z"));
        let extracted = onnx.extract_graph(&g).unwrap();
        assert_eq!(extracted.unhandled, vec!["z".to_string()]);
        assert!(extracted.node_by_name("k").unwrap().is_extracted());
        let z = extracted.node_by_name("z").unwrap();
        assert!(!z.is_extracted());
        assert_eq!(z.inputs.as_slice(), &["y".to_string()]);
    }

    #[test]
    fn model_without_graph_is_an_error() {
        assert!(crate::onnx().extract_model(&pb::ModelProto::default()).is_err());
    }
}
