//! 消息帧
//!
//! 引擎的 `receive` 返回 `(指针, 长度)`。缓冲区归引擎所有，调用返回后
//! 生命周期不再保证，因此解码时立即把字节复制进拥有所有权的 [`Message`]。
//! 哨兵长度只在这里比较，上层只看到 [`Frame::Shutdown`]。

use crate::abi::QUIT_CMD;
use crate::error::DecodeError;
use serde::de::DeserializeOwned;
use std::fmt;
use std::os::raw::{c_char, c_int};

/// 引擎消息：拥有所有权的不可变字节序列
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Message {
    bytes: Box<[u8]>,
}

impl Message {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into().into_boxed_slice(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes.into_vec()
    }

    /// 按 UTF-8 解释消息
    pub fn to_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.bytes)
    }

    /// 把消息解析为 JSON
    ///
    /// 桥接层不关心消息内容，这只是给宿主的便利方法。
    pub fn parse_json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.bytes)
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_str() {
            Ok(text) => f.debug_tuple("Message").field(&text).finish(),
            Err(_) => f.debug_tuple("Message").field(&self.bytes).finish(),
        }
    }
}

impl From<Vec<u8>> for Message {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for Message {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::new(text.into_bytes())
    }
}

impl AsRef<[u8]> for Message {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// 一次 `receive` 调用的解码结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// 真实消息
    Message(Message),
    /// 哨兵：引擎要求接收循环退出
    Shutdown,
}

impl Frame {
    pub fn is_shutdown(&self) -> bool {
        matches!(self, Frame::Shutdown)
    }
}

/// 从一段借用的缓冲区解码
///
/// `len` 是引擎报告的长度，`buf` 至少要包含 `len` 个字节。
pub fn decode_slice(len: c_int, buf: &[u8]) -> Result<Frame, DecodeError> {
    let len = checked_len(len)?;
    let Some(len) = len else {
        return Ok(Frame::Shutdown);
    };
    let bytes = buf.get(..len).ok_or(DecodeError::Truncated {
        declared: len,
        available: buf.len(),
    })?;
    Ok(Frame::Message(Message::new(bytes)))
}

/// 从引擎返回的原始指针解码
///
/// # Safety
///
/// 当 `len > 0` 时，`ptr` 必须指向至少 `len` 个可读字节，并且在本次调用
/// 期间保持有效。
pub unsafe fn decode_raw(len: c_int, ptr: *const c_char) -> Result<Frame, DecodeError> {
    let Some(size) = checked_len(len)? else {
        return Ok(Frame::Shutdown);
    };
    if size == 0 {
        return Ok(Frame::Message(Message::default()));
    }
    if ptr.is_null() {
        return Err(DecodeError::NullBuffer { len });
    }
    let bytes = std::slice::from_raw_parts(ptr.cast::<u8>(), size);
    Ok(Frame::Message(Message::new(bytes)))
}

/// `None` 表示哨兵
fn checked_len(len: c_int) -> Result<Option<usize>, DecodeError> {
    match len {
        QUIT_CMD => Ok(None),
        n if n < 0 => Err(DecodeError::InvalidLength(n)),
        n => Ok(Some(n as usize)),
    }
}
