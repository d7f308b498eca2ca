mod squeeze;
mod unsqueeze;

use crate::model::ExtractorRegister;

pub use self::squeeze::SqueezeFrontExtractor;
pub use self::unsqueeze::UnsqueezeFrontExtractor;

pub fn register_all_ops(reg: &mut ExtractorRegister) {
    reg.insert(SqueezeFrontExtractor);
    reg.insert(UnsqueezeFrontExtractor);
}
