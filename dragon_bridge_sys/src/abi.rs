//! 引擎 C ABI 定义
//!
//! 引擎以共享库形式导出五个原语，符号名为 `<prefix>_init` 等。

use serde::{Deserialize, Serialize};
use std::os::raw::{c_char, c_int};

/// 保留的哨兵长度：没有负载，接收循环应当终止
pub const QUIT_CMD: c_int = -1;

/// 默认符号前缀
pub const DEFAULT_SYMBOL_PREFIX: &str = "dragon";

/// `bool init(void)`
pub type InitFn = unsafe extern "C" fn() -> bool;

/// `int send(const char*, int, const char*, int)`，返回关联令牌
pub type SendTokenFn =
    unsafe extern "C" fn(cmd: *const c_char, cmd_len: c_int, payload: *const c_char, payload_len: c_int) -> c_int;

/// `void send(const char*, int, const char*, int)`，早期版本没有返回值
pub type SendVoidFn =
    unsafe extern "C" fn(cmd: *const c_char, cmd_len: c_int, payload: *const c_char, payload_len: c_int);

/// `int receive(const char** out)`，阻塞直到有消息或哨兵
pub type ReceiveFn = unsafe extern "C" fn(out: *mut *const c_char) -> c_int;

/// `bool poke(void)`
pub type PokeFn = unsafe extern "C" fn() -> bool;

/// `bool quit(void)`
pub type QuitFn = unsafe extern "C" fn() -> bool;

/// 引擎 ABI 版本
///
/// 只有 `send` 的返回值在不同版本之间不同。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbiRevision {
    /// `send` 返回 `int` 令牌
    #[default]
    Tokened,
    /// `send` 返回 `void`
    Tokenless,
}

/// 按前缀生成的五个符号名称
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolNames {
    pub init: String,
    pub send: String,
    pub receive: String,
    pub poke: String,
    pub quit: String,
}

impl SymbolNames {
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            init: format!("{}_init", prefix),
            send: format!("{}_send", prefix),
            receive: format!("{}_receive", prefix),
            poke: format!("{}_poke", prefix),
            quit: format!("{}_quit", prefix),
        }
    }
}

impl Default for SymbolNames {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_SYMBOL_PREFIX)
    }
}
