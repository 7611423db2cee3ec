//! # dragon_bridge_sys
//!
//! dragon 引擎的原始 C ABI 层，为 `dragon_bridge` 提供符号加载与消息帧解码。
//!
//! ## 特性
//!
//! - **ABI 定义**: 五个引擎原语（init/send/receive/poke/quit）的函数签名
//! - **帧解码**: 在边界处把 `QUIT_CMD` 长度转换为 [`Frame::Shutdown`]
//! - **动态加载**: 通过 `libloading` 在运行时解析引擎共享库
//!
//! ## 快速开始
//!
//! ```rust
//! use dragon_bridge_sys::{decode_slice, Frame, QUIT_CMD};
//!
//! let frame = decode_slice(2, b"BB").unwrap();
//! assert_eq!(frame, Frame::Message(b"BB".to_vec().into()));
//!
//! assert_eq!(decode_slice(QUIT_CMD, &[]).unwrap(), Frame::Shutdown);
//! ```
//!
//! ## 模块
//!
//! - [`abi`]: C 函数签名和符号名称
//! - [`frame`]: `Message` / `Frame` 以及解码
//! - [`library`]: 引擎共享库加载器
//! - [`error`]: 错误类型

pub mod abi;
pub mod error;
pub mod frame;
pub mod library;

pub use abi::{AbiRevision, SymbolNames, DEFAULT_SYMBOL_PREFIX, QUIT_CMD};
pub use error::{DecodeError, LibraryError, LibraryResult};
pub use frame::{decode_raw, decode_slice, Frame, Message};
pub use library::EngineLibrary;
