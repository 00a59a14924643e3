//! Windows 平台實作
//!
//! Windows 沒有 POSIX uid/gid，身分相關查詢回傳 -1。
//! 父行程透過 ToolHelp 快照取得，提權狀態透過行程 token 判斷。

use super::Platform;
use std::ffi::c_void;
use std::mem::size_of;
use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::Security::{GetTokenInformation, TokenElevation, TOKEN_ELEVATION, TOKEN_QUERY};
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, Process32FirstW, Process32NextW, PROCESSENTRY32W,
    TH32CS_SNAPPROCESS,
};
use windows::Win32::System::Threading::{GetCurrentProcess, GetCurrentProcessId, OpenProcessToken};

pub const EOL: &[u8] = b"\r\n";

#[derive(Debug, Clone, Copy, Default)]
pub struct Host;

impl Platform for Host {
    fn pid(&self) -> i64 {
        i64::from(std::process::id())
    }

    fn raw_ppid(&self) -> i64 {
        parent_process_id().map(i64::from).unwrap_or(0)
    }

    fn is_elevated(&self) -> bool {
        token_is_elevated()
    }

    fn eol(&self) -> &'static [u8] {
        EOL
    }
}

/// 在行程快照中尋找目前行程的父行程 id
fn parent_process_id() -> Option<u32> {
    unsafe {
        let pid = GetCurrentProcessId();
        let snapshot = CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0).ok()?;

        let mut entry = PROCESSENTRY32W {
            dwSize: size_of::<PROCESSENTRY32W>() as u32,
            ..Default::default()
        };

        let mut parent = None;
        if Process32FirstW(snapshot, &mut entry).is_ok() {
            loop {
                if entry.th32ProcessID == pid {
                    parent = Some(entry.th32ParentProcessID);
                    break;
                }
                if Process32NextW(snapshot, &mut entry).is_err() {
                    break;
                }
            }
        }

        let _ = CloseHandle(snapshot);
        parent
    }
}

/// 查詢行程 token 是否已提權（系統管理員）
fn token_is_elevated() -> bool {
    unsafe {
        let mut token = HANDLE::default();
        if OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &mut token).is_err() {
            return false;
        }

        let mut elevation = TOKEN_ELEVATION::default();
        let mut returned = 0u32;
        let queried = GetTokenInformation(
            token,
            TokenElevation,
            Some(&mut elevation as *mut TOKEN_ELEVATION as *mut c_void),
            size_of::<TOKEN_ELEVATION>() as u32,
            &mut returned,
        )
        .is_ok();

        let _ = CloseHandle(token);
        queried && elevation.TokenIsElevated != 0
    }
}
