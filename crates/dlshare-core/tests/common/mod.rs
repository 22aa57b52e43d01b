#![allow(dead_code)]

pub mod http_server;

use dlshare_core::share::{ShareRequest, ShareTarget};
use std::sync::Mutex;

/// Share target that keeps every dispatched request.
#[derive(Default)]
pub struct RecordingShare {
    requests: Mutex<Vec<ShareRequest>>,
}

impl RecordingShare {
    pub fn requests(&self) -> Vec<ShareRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl ShareTarget for RecordingShare {
    fn dispatch(&self, request: &ShareRequest) -> anyhow::Result<()> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(())
    }
}

/// Minimal PNG: signature plus an IHDR chunk declaring `width` x `height`.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut v = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    v.extend_from_slice(&13u32.to_be_bytes());
    v.extend_from_slice(b"IHDR");
    v.extend_from_slice(&width.to_be_bytes());
    v.extend_from_slice(&height.to_be_bytes());
    v.extend_from_slice(&[8, 6, 0, 0, 0, 0, 0, 0, 0]);
    v
}
