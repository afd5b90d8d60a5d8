//! Recording transport for driver and CLI tests.

use super::DeviceTransport;
use crate::{Error, Result};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A transfer as issued by a driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transfer {
    Control {
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: Vec<u8>,
    },
    BulkOut {
        endpoint: u8,
        data: Vec<u8>,
    },
    BulkIn {
        endpoint: u8,
        len: usize,
    },
}

/// Records every transfer and replays queued IN responses.
#[derive(Default)]
pub struct MockTransport {
    log: Mutex<Vec<Transfer>>,
    responses: Mutex<VecDeque<Result<Vec<u8>>>>,
    write_limit: Option<usize>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports at most `limit` bytes written per bulk OUT transfer.
    pub fn with_write_limit(limit: usize) -> Self {
        Self {
            write_limit: Some(limit),
            ..Self::default()
        }
    }

    /// Queues data for the next bulk IN read.
    pub fn push_response(&self, data: &[u8]) {
        self.responses.lock().unwrap().push_back(Ok(data.to_vec()));
    }

    /// Queues an error for the next bulk IN read.
    pub fn push_error(&self, error: Error) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn transfers(&self) -> Vec<Transfer> {
        self.log.lock().unwrap().clone()
    }
}

impl DeviceTransport for MockTransport {
    fn write_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize> {
        self.log.lock().unwrap().push(Transfer::Control {
            request_type,
            request,
            value,
            index,
            data: data.to_vec(),
        });
        Ok(data.len())
    }

    fn write_bulk(&self, endpoint: u8, data: &[u8]) -> Result<usize> {
        self.log.lock().unwrap().push(Transfer::BulkOut {
            endpoint,
            data: data.to_vec(),
        });
        Ok(self.write_limit.map_or(data.len(), |limit| limit.min(data.len())))
    }

    fn read_bulk(&self, endpoint: u8, buf: &mut [u8]) -> Result<usize> {
        self.log.lock().unwrap().push(Transfer::BulkIn {
            endpoint,
            len: buf.len(),
        });
        let data = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(Error::Usb(rusb::Error::Timeout)))?;
        let n = data.len().min(buf.len());
        buf[..n].copy_from_slice(&data[..n]);
        Ok(n)
    }
}
