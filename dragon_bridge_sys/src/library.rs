//! 引擎共享库加载器
//!
//! 运行时打开引擎共享库并解析五个原语。函数指针从 `Symbol` 中复制出来，
//! `Library` 与它们保存在同一个结构体里，保证指针在结构体存活期间有效。

use crate::abi::{
    AbiRevision, InitFn, PokeFn, QuitFn, ReceiveFn, SendTokenFn, SendVoidFn, SymbolNames,
};
use crate::error::{DecodeError, LibraryError, LibraryResult};
use crate::frame::{decode_raw, Frame};
use libloading::{Library, Symbol};
use std::os::raw::{c_char, c_int};
use std::path::Path;

pub(crate) enum SendEntry {
    Tokened(SendTokenFn),
    Tokenless(SendVoidFn),
}

pub(crate) struct EntryPoints {
    pub(crate) init: InitFn,
    pub(crate) send: SendEntry,
    pub(crate) receive: ReceiveFn,
    pub(crate) poke: PokeFn,
    pub(crate) quit: QuitFn,
}

/// 已加载的引擎共享库
pub struct EngineLibrary {
    init: InitFn,
    send: SendEntry,
    receive: ReceiveFn,
    poke: PokeFn,
    quit: QuitFn,
    // 必须最后释放
    _library: Library,
}

impl EngineLibrary {
    /// 打开引擎库并解析全部符号
    ///
    /// # Safety
    ///
    /// 加载共享库会执行其初始化代码；调用方还必须保证库导出的符号
    /// 与 [`crate::abi`] 中声明的签名一致，并且 `send` 可以与另一个线程上
    /// 正在阻塞的 `receive` 并发调用。
    pub unsafe fn open(
        path: impl AsRef<Path>,
        symbols: &SymbolNames,
        revision: AbiRevision,
    ) -> LibraryResult<Self> {
        let path = path.as_ref();
        let library = Library::new(path).map_err(|source| LibraryError::Load {
            path: path.display().to_string(),
            source,
        })?;

        let entries = EntryPoints {
            init: *resolve::<InitFn>(&library, &symbols.init)?,
            send: match revision {
                AbiRevision::Tokened => {
                    SendEntry::Tokened(*resolve::<SendTokenFn>(&library, &symbols.send)?)
                }
                AbiRevision::Tokenless => {
                    SendEntry::Tokenless(*resolve::<SendVoidFn>(&library, &symbols.send)?)
                }
            },
            receive: *resolve::<ReceiveFn>(&library, &symbols.receive)?,
            poke: *resolve::<PokeFn>(&library, &symbols.poke)?,
            quit: *resolve::<QuitFn>(&library, &symbols.quit)?,
        };

        tracing::debug!(target: "bridge::engine", "Loaded engine library {} ({:?})", path.display(), revision);

        Ok(Self::from_parts(library, entries))
    }

    /// 用已解析的入口组装，`entries` 必须来自 `library` 或存活时间更长的代码
    pub(crate) fn from_parts(library: Library, entries: EntryPoints) -> Self {
        Self {
            init: entries.init,
            send: entries.send,
            receive: entries.receive,
            poke: entries.poke,
            quit: entries.quit,
            _library: library,
        }
    }

    pub fn init(&self) -> bool {
        unsafe { (self.init)() }
    }

    /// 调用引擎的 `send`
    ///
    /// 无令牌版本返回 `Ok(None)`。
    pub fn send(&self, command: &[u8], payload: &[u8]) -> LibraryResult<Option<c_int>> {
        let cmd_len = abi_len("command", command)?;
        let payload_len = abi_len("payload", payload)?;
        let cmd_ptr = command.as_ptr().cast::<c_char>();
        let payload_ptr = payload.as_ptr().cast::<c_char>();
        let token = unsafe {
            match self.send {
                SendEntry::Tokened(send) => Some(send(cmd_ptr, cmd_len, payload_ptr, payload_len)),
                SendEntry::Tokenless(send) => {
                    send(cmd_ptr, cmd_len, payload_ptr, payload_len);
                    None
                }
            }
        };
        Ok(token)
    }

    /// 阻塞调用引擎的 `receive` 并立即复制出缓冲区
    pub fn receive(&self) -> Result<Frame, DecodeError> {
        let mut ptr: *const c_char = std::ptr::null();
        unsafe {
            let len = (self.receive)(&mut ptr);
            decode_raw(len, ptr)
        }
    }

    pub fn poke(&self) -> bool {
        unsafe { (self.poke)() }
    }

    pub fn quit(&self) -> bool {
        unsafe { (self.quit)() }
    }

    pub fn revision(&self) -> AbiRevision {
        match self.send {
            SendEntry::Tokened(_) => AbiRevision::Tokened,
            SendEntry::Tokenless(_) => AbiRevision::Tokenless,
        }
    }
}

unsafe fn resolve<'lib, T>(library: &'lib Library, name: &str) -> LibraryResult<Symbol<'lib, T>> {
    library
        .get::<T>(name.as_bytes())
        .map_err(|source| LibraryError::MissingSymbol {
            symbol: name.to_string(),
            source,
        })
}

fn abi_len(field: &'static str, bytes: &[u8]) -> LibraryResult<c_int> {
    c_int::try_from(bytes.len()).map_err(|_| LibraryError::ArgumentTooLarge {
        field,
        len: bytes.len(),
    })
}
