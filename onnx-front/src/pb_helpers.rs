use crate::pb::attribute_proto::AttributeType;
use crate::pb::*;
use mofront_ir::internal::*;

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            AttributeType::Int => "int",
            AttributeType::Float => "float",
            AttributeType::Tensor => "tensor",
            AttributeType::String => "string",
            AttributeType::Ints => "list of ints",
            AttributeType::Floats => "list of floats",
            AttributeType::Tensors => "list of tensors",
            AttributeType::Strings => "list of strings",
            AttributeType::Graph => "graph",
            AttributeType::Graphs => "graphs",
            _ => "<undefined>",
        })
    }
}

impl NodeProto {
    pub fn bail_attr<T>(&self, attr: &str, msg: &str) -> FrontResult<T> {
        bail!("Node {} ({}), attribute '{}': {}", self.name, self.op_type, attr, msg)
    }

    fn get_attr_opt_with_type(
        &self,
        name: &str,
        ty: AttributeType,
    ) -> FrontResult<Option<&AttributeProto>> {
        let Some(attr) = self.attribute.iter().find(|a| a.name == name) else {
            return Ok(None);
        };
        if attr.r#type() != ty {
            return self.bail_attr(name, &format!("expected {}, got {}", ty, attr.r#type()));
        }
        Ok(Some(attr))
    }

    pub fn get_attr_opt_ints(&self, name: &str) -> FrontResult<Option<&[i64]>> {
        Ok(self.get_attr_opt_with_type(name, AttributeType::Ints)?.map(|attr| &*attr.ints))
    }

    /// Integer list lookup falling back to `default` when the node does not
    /// carry the attribute. An attribute of another kind is still an error.
    pub fn get_attr_ints_or(&self, name: &str, default: Vec<i64>) -> FrontResult<Vec<i64>> {
        Ok(self.get_attr_opt_ints(name)?.map(<[i64]>::to_vec).unwrap_or(default))
    }
}

pub fn graph() -> GraphProto {
    GraphProto::default()
}

pub fn node() -> NodeProto {
    NodeProto::default()
}

impl GraphProto {
    pub fn name<S: ToString>(mut self, n: S) -> Self {
        self.name = n.to_string();
        self
    }

    pub fn node(mut self, n: NodeProto) -> Self {
        self.node.push(n);
        self
    }

    pub fn into_model(self, opset_version: i64) -> ModelProto {
        ModelProto {
            ir_version: 7,
            opset_import: vec![OperatorSetIdProto { domain: String::new(), version: opset_version }],
            graph: Some(self),
            ..ModelProto::default()
        }
    }
}

impl ModelProto {
    pub fn write_to_bytes(&self) -> Vec<u8> {
        use prost::Message;
        self.encode_to_vec()
    }

    /// Version of the default ONNX operator set imported by the model.
    pub fn onnx_operator_set_version(&self) -> Option<i64> {
        self.opset_import
            .iter()
            .find(|import| import.domain.is_empty() || import.domain == "ai.onnx")
            .map(|import| import.version)
    }
}

impl NodeProto {
    pub fn name<S: ToString>(mut self, n: S) -> NodeProto {
        self.name = n.to_string();
        self
    }

    pub fn op<S: ToString>(mut self, n: S) -> NodeProto {
        self.op_type = n.to_string();
        self
    }

    pub fn input<S: ToString>(mut self, n: S) -> NodeProto {
        self.input.push(n.to_string());
        self
    }

    pub fn output<S: ToString>(mut self, n: S) -> NodeProto {
        self.output.push(n.to_string());
        self
    }

    pub fn attr_int<S: ToString>(mut self, n: S, i: i64) -> NodeProto {
        self.attribute.push(AttributeProto {
            name: n.to_string(),
            r#type: AttributeType::Int as i32,
            i,
            ..AttributeProto::default()
        });
        self
    }

    pub fn attr_ints<S: ToString>(mut self, n: S, ints: &[i64]) -> NodeProto {
        self.attribute.push(AttributeProto {
            name: n.to_string(),
            r#type: AttributeType::Ints as i32,
            ints: ints.to_vec(),
            ..AttributeProto::default()
        });
        self
    }

    pub fn attr_str<S: ToString>(mut self, n: S, s: &str) -> NodeProto {
        self.attribute.push(AttributeProto {
            name: n.to_string(),
            r#type: AttributeType::String as i32,
            s: s.as_bytes().to_vec(),
            ..AttributeProto::default()
        });
        self
    }
}
