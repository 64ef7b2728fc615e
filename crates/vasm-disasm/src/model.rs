use anyhow::Result;
use std::path::Path;

/// A raw VASM image, or a slice of one.
#[derive(Debug, Clone)]
pub struct Image {
    /// Offset of `bytes[0]` in the original image.
    pub base: usize,
    pub bytes: Vec<u8>,
}

impl Image {
    pub fn end(&self) -> usize {
        self.base + self.bytes.len()
    }

    /// Bytes from `offset` to the end of the image.
    pub fn tail(&self, offset: usize) -> Option<&[u8]> {
        self.bytes.get(offset.checked_sub(self.base)?..)
    }
}

pub fn load_raw_bin(path: &Path, skip: usize, len: Option<usize>) -> Result<Image> {
    let file = std::fs::read(path)?;
    anyhow::ensure!(skip <= file.len(), "--skip exceeds file size");
    let mut payload = &file[skip..];
    if let Some(lim) = len {
        anyhow::ensure!(lim <= payload.len(), "--len exceeds remaining file size after skip");
        payload = &payload[..lim];
    }
    Ok(Image { base: skip, bytes: payload.to_vec() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_maps_skip_and_len() {
        let dir = std::env::temp_dir();
        let path = dir.join("_vasm_disasm_test.bin");
        std::fs::write(&path, [0u8, 1, 2, 3, 4, 5]).unwrap();
        let img = load_raw_bin(&path, 2, Some(3)).unwrap();
        assert_eq!(img.base, 2);
        assert_eq!(img.bytes, vec![2, 3, 4]);
        assert_eq!(img.end(), 5);
        assert_eq!(img.tail(3), Some(&[3u8, 4][..]));
        assert_eq!(img.tail(1), None);
        assert!(load_raw_bin(&path, 7, None).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
