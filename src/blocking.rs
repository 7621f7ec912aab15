//! Blocking adapters over the async client and session.
//!
//! Each adapter owns a current-thread Tokio runtime and calls `block_on` at
//! the network boundary; the business logic (path resolution, parsing,
//! error policy) is the async implementation, unduplicated. Used by the
//! interactive shell and any caller without a runtime of its own.
//!
//! Do not construct these inside an async context: `block_on` would panic
//! under a running runtime.

use tokio::runtime::{Builder, Runtime};

use reqwest::header::HeaderMap;

use crate::client::DavResponse;
use crate::config::DavConfig;
use crate::error::DavError;
use crate::models::{Depth, Method, Resource};

fn runtime() -> Result<Runtime, DavError> {
    Ok(Builder::new_current_thread().enable_all().build()?)
}

/// Blocking counterpart of [`crate::DavClient`].
#[derive(Debug)]
pub struct DavClient {
    rt: Runtime,
    inner: crate::DavClient,
}

impl DavClient {
    pub fn new(config: DavConfig) -> Result<Self, DavError> {
        Ok(Self {
            rt: runtime()?,
            inner: crate::DavClient::new(config)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }

    pub fn request(
        &self,
        method: Method,
        path: &str,
        headers: Option<HeaderMap>,
        body: Option<Vec<u8>>,
    ) -> Result<DavResponse, DavError> {
        self.rt.block_on(self.inner.request(method, path, headers, body))
    }

    pub fn request_url(
        &self,
        method: Method,
        url: &str,
        headers: Option<HeaderMap>,
        body: Option<Vec<u8>>,
    ) -> Result<DavResponse, DavError> {
        self.rt
            .block_on(self.inner.request_url(method, url, headers, body))
    }

    pub fn propfind(
        &self,
        path: &str,
        depth: Depth,
        properties: Option<&[&str]>,
    ) -> Result<DavResponse, DavError> {
        self.rt.block_on(self.inner.propfind(path, depth, properties))
    }

    pub fn get(&self, path: &str) -> Result<DavResponse, DavError> {
        self.rt.block_on(self.inner.get(path))
    }

    pub fn put(&self, path: &str, content: Vec<u8>) -> Result<DavResponse, DavError> {
        self.rt.block_on(self.inner.put(path, content))
    }

    pub fn delete(&self, path: &str) -> Result<DavResponse, DavError> {
        self.rt.block_on(self.inner.delete(path))
    }

    pub fn mkcol(&self, path: &str) -> Result<DavResponse, DavError> {
        self.rt.block_on(self.inner.mkcol(path))
    }

    pub fn mv(&self, src: &str, target: &str) -> Result<DavResponse, DavError> {
        self.rt.block_on(self.inner.mv(src, target))
    }

    pub fn cp(&self, src: &str, target: &str) -> Result<DavResponse, DavError> {
        self.rt.block_on(self.inner.cp(src, target))
    }
}

/// Blocking counterpart of [`crate::Session`].
#[derive(Debug)]
pub struct Session {
    rt: Runtime,
    inner: crate::Session,
}

impl Session {
    pub fn new(config: DavConfig) -> Result<Self, DavError> {
        let rt = runtime()?;
        let client = crate::DavClient::new(config)?;
        Ok(Self {
            rt,
            inner: crate::Session::new(client),
        })
    }

    pub fn cwd(&self) -> &str {
        self.inner.cwd()
    }

    pub fn ls(&self, path: &str) -> Result<Vec<Resource>, DavError> {
        self.rt.block_on(self.inner.ls(path))
    }

    pub fn cd(&mut self, target: &str) {
        self.inner.cd(target);
    }

    pub fn mkdir(&self, name: &str) -> Result<(), DavError> {
        self.rt.block_on(self.inner.mkdir(name))
    }

    pub fn upload(&self, dest: &str, content: &[u8]) -> Result<(), DavError> {
        self.rt.block_on(self.inner.upload(dest, content))
    }

    pub fn download(&self, src: &str) -> Result<Vec<u8>, DavError> {
        self.rt.block_on(self.inner.download(src))
    }

    pub fn mv(&self, src: &str, target: &str) -> Result<(), DavError> {
        self.rt.block_on(self.inner.mv(src, target))
    }

    pub fn cp(&self, src: &str, target: &str) -> Result<(), DavError> {
        self.rt.block_on(self.inner.cp(src, target))
    }

    pub fn rm(&self, path: &str) -> Result<(), DavError> {
        self.rt.block_on(self.inner.rm(path))
    }
}
