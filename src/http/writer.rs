use anyhow::Context;
use bytes::BytesMut;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt,
};

use crate::http::response::{ResponseHead, NOT_FOUND_BODY};
use crate::http::template::Substitutions;

/// Size of each read when copying a file to the client.
pub const CHUNK_SIZE: usize = 8 * 1024;

/// Writes one response, head first, then the body.
pub struct ResponseWriter<W> {
    inner: W,
    written: u64,
}

impl<W> ResponseWriter<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Bytes handed to the stream so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    async fn write_bytes(&mut self, buf: &[u8]) -> anyhow::Result<()> {
        self.inner
            .write_all(buf)
            .await
            .context("connection closed while writing")?;
        self.written += buf.len() as u64;
        Ok(())
    }

    pub async fn write_head(&mut self, head: &ResponseHead) -> anyhow::Result<()> {
        let buf = head.to_bytes();
        self.write_bytes(&buf).await
    }

    /// Copies a text body line by line, substituting template markers.
    /// Line terminators are written back unchanged.
    pub async fn write_templated<R>(
        &mut self,
        mut reader: R,
        subs: &Substitutions,
    ) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut line = Vec::with_capacity(256);
        let mut out = BytesMut::with_capacity(256);

        loop {
            line.clear();
            let n = reader
                .read_until(b'\n', &mut line)
                .await
                .context("failed to read document")?;
            if n == 0 {
                break;
            }

            out.clear();
            subs.apply(&line, &mut out);
            self.write_bytes(&out).await?;
        }

        Ok(())
    }

    /// Copies a body verbatim in `CHUNK_SIZE` pieces until end of file.
    pub async fn write_raw<R>(&mut self, mut reader: R) -> anyhow::Result<()>
    where
        R: AsyncRead + Unpin,
    {
        let mut buf = BytesMut::with_capacity(CHUNK_SIZE);

        loop {
            buf.clear();
            let n = reader
                .read_buf(&mut buf)
                .await
                .context("failed to read file")?;
            if n == 0 {
                break;
            }

            self.write_bytes(&buf).await?;
        }

        Ok(())
    }

    pub async fn write_not_found_page(&mut self) -> anyhow::Result<()> {
        self.write_bytes(NOT_FOUND_BODY).await
    }

    /// Flushes and hands the stream back.
    pub async fn finish(mut self) -> anyhow::Result<W> {
        self.inner.flush().await.context("failed to flush response")?;
        Ok(self.inner)
    }
}
