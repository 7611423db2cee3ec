/// 引擎边界错误类型
use std::os::raw::c_int;
use thiserror::Error;

/// 接收帧解码错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// 除哨兵外的负长度
    #[error("Invalid frame length {0}: only -1 is reserved as the quit sentinel")]
    InvalidLength(c_int),

    /// 非空帧却得到空指针
    #[error("Engine returned a null buffer for a {len}-byte frame")]
    NullBuffer { len: c_int },

    /// 声明的长度超过了实际缓冲区
    #[error("Frame truncated: declared {declared} bytes, {available} available")]
    Truncated { declared: usize, available: usize },
}

/// 共享库加载与调用错误
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Failed to load engine library {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: libloading::Error,
    },

    #[error("Engine library is missing symbol `{symbol}`: {source}")]
    MissingSymbol {
        symbol: String,
        #[source]
        source: libloading::Error,
    },

    #[error("{field} is {len} bytes, larger than the engine ABI allows")]
    ArgumentTooLarge { field: &'static str, len: usize },
}

pub type LibraryResult<T> = Result<T, LibraryError>;
