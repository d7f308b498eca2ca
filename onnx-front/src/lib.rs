#[allow(unused_imports)]
#[macro_use]
extern crate derive_new;
#[allow(unused_imports)]
#[macro_use]
extern crate log;

pub mod model;
pub mod ops;
pub mod pb {
    include!("prost/onnx.rs");
}
pub mod pb_helpers;

pub use self::model::{ExtractedGraph, ExtractorRegister, FrontExtractor, Onnx};

pub mod prelude {
    pub use crate::model::{ExtractedGraph, FrontExtractor, Onnx};
    pub use crate::onnx;
    pub use mofront_ir::prelude::*;
}

/// The ONNX front-end with every known extractor registered.
pub fn onnx() -> Onnx {
    let mut op_register = ExtractorRegister::default();
    ops::register_all_ops(&mut op_register);
    Onnx { op_register }
}

#[cfg(test)]
#[allow(dead_code)]
fn setup_test_logger() {
    let _ = env_logger::Builder::from_env("MOFRONT_LOG").try_init();
}
