use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Read all of `reader` as UTF-8, refusing more than `limit` bytes
pub async fn read_limited<R: AsyncRead + Unpin>(reader: R, limit: usize) -> Result<String> {
    let mut buf = Vec::new();
    let read = reader
        .take((limit as u64).saturating_add(1))
        .read_to_end(&mut buf)
        .await?;
    if read > limit {
        anyhow::bail!("input exceeds {} bytes", limit);
    }
    Ok(String::from_utf8(buf)?)
}

/// Read a whole batch from `path`, or from stdin when `path` is `-`
pub async fn read_input(path: &str, limit: usize) -> Result<String> {
    if path == "-" {
        read_limited(tokio::io::stdin(), limit).await.context("reading stdin")
    } else {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("opening {}", path))?;
        read_limited(file, limit)
            .await
            .with_context(|| format!("reading {}", path))
    }
}

/// Write all bytes or fail
pub async fn write_all<W: AsyncWrite + Unpin>(writer: &mut W, buf: &[u8]) -> std::io::Result<()> {
    writer.write_all(buf).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_limited() {
        let text = read_limited(&b"1 2 3"[..], 5).await.unwrap();
        assert_eq!(text, "1 2 3");
    }

    #[tokio::test]
    async fn test_read_limited_rejects_oversized() {
        assert!(read_limited(&b"123456"[..], 5).await.is_err());
    }

    #[tokio::test]
    async fn test_read_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.txt");
        std::fs::write(&path, "300\n-1\n").unwrap();

        let text = read_input(path.to_str().unwrap(), 1024).await.unwrap();
        assert_eq!(text, "300\n-1\n");
    }

    #[tokio::test]
    async fn test_write_all() {
        let mut out = Vec::new();
        write_all(&mut out, b"ac 02\n").await.unwrap();
        assert_eq!(out, b"ac 02\n");
    }
}
