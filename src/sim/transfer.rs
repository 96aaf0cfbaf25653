//! 待处理的数据传输

use serde::{Deserialize, Serialize};

/// 一次数据传输：源、目的（按节点名称）以及任意长度的负载
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: String,
    pub to: String,
    pub payload: Vec<u8>,
}

impl Transfer {
    pub fn new(from: impl Into<String>, to: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            payload: payload.into(),
        }
    }
}
