//=========================================================================
// Asset Descriptors & Fetcher Seam
//
// Declares what gets loaded (descriptor table entries), what loading
// produces (typed payloads), and the injectable seam that performs the
// actual fetch+decode.
//
// The loading *protocol* (two phases, barrier, progress) lives in the
// manager. The fetch *mechanism* (filesystem, HTTP, embedded bytes) is
// deliberately external: demos and tests inject an [`AssetFetcher`]
// implementation, which also keeps the barrier deterministic under test.
//
//=========================================================================

//=== Internal Modules ====================================================

use super::AssetError;

//=== AssetKind ===========================================================

/// Media type of a descriptor, selecting the decode path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// LDR image data.
    Texture,

    /// High-dynamic-range image data (environment maps and the like).
    Hdr,

    /// Font data, kept as raw bytes for the consumer's text engine.
    Font,
}

//=== AssetDescriptor =====================================================

/// One entry of the application's asset table.
///
/// Maps a logical name (the table key) to a source URL, a media type and
/// the loading phase: `must` descriptors gate startup, the rest stream in
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDescriptor {
    pub url: String,
    pub kind: AssetKind,
    pub must: bool,
}

impl AssetDescriptor {
    /// Descriptor for a startup-gating asset.
    pub fn must(url: impl Into<String>, kind: AssetKind) -> Self {
        Self { url: url.into(), kind, must: true }
    }

    /// Descriptor for a deferred asset.
    pub fn optional(url: impl Into<String>, kind: AssetKind) -> Self {
        Self { url: url.into(), kind, must: false }
    }
}

//=== AssetPayload ========================================================

/// Decoded asset data.
///
/// Once a payload lands in the table its `Arc` is stable for the rest of
/// the session; consumers can hold the reference across frames.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetPayload {
    /// Decoded LDR pixels, tightly packed RGBA8.
    Texture { width: u32, height: u32, pixels: Vec<u8> },

    /// Decoded HDR pixels, tightly packed RGB `f32`.
    Hdr { width: u32, height: u32, pixels: Vec<f32> },

    /// Raw font bytes.
    Font { bytes: Vec<u8> },
}

impl AssetPayload {
    /// The media type this payload satisfies.
    pub fn kind(&self) -> AssetKind {
        match self {
            AssetPayload::Texture { .. } => AssetKind::Texture,
            AssetPayload::Hdr { .. } => AssetKind::Hdr,
            AssetPayload::Font { .. } => AssetKind::Font,
        }
    }
}

//=== AssetFetcher ========================================================

/// Fetch-and-decode seam, dispatched per descriptor.
///
/// Implementations are called concurrently from loader worker threads,
/// one call per descriptor, and must pick the decode path from
/// `descriptor.kind`. A returned error settles the descriptor as failed;
/// it never stalls the barrier.
pub trait AssetFetcher: Send + Sync + 'static {
    fn fetch(&self, key: &str, descriptor: &AssetDescriptor) -> Result<AssetPayload, AssetError>;
}

//=========================================================================
// Unit Tests
//=========================================================================
