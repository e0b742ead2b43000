//! 文档标识生成。
//!
//! 以依赖注入的方式传入服务，避免全局单例；生成器本身不做
//! 唯一性检查，冲突处理留给调用方。

use domain::{DocId, DOC_ID_ALPHABET, DOC_ID_LEN};
use rand::Rng;

pub trait DocIdGenerator: Send + Sync {
    fn generate(&self) -> DocId;
}

/// 均匀随机生成器：逐字符独立地从 36 个符号里抽取。
#[derive(Debug, Default)]
pub struct RandomDocIdGenerator;

impl DocIdGenerator for RandomDocIdGenerator {
    fn generate(&self) -> DocId {
        let mut rng = rand::rng();
        let raw: String = (0..DOC_ID_LEN)
            .map(|_| DOC_ID_ALPHABET[rng.random_range(0..DOC_ID_ALPHABET.len())] as char)
            .collect();
        // 字符全部取自合法字母表，解析不可能失败
        DocId::parse(raw).expect("generated doc id is always valid")
    }
}
