use crate::model::ExtractorRegister;

pub mod array;

pub fn register_all_ops(reg: &mut ExtractorRegister) {
    array::register_all_ops(reg);
}
