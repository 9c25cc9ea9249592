use bitflags::bitflags;

/// Index of a render view.
///
/// bgfx supports a fixed number of views; the id crosses the boundary as a
/// single byte and is not range-checked here.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u8);

impl ViewId {
    /// The view conventionally used for the backbuffer.
    pub const MAIN: Self = Self(0);

    #[inline]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl From<u8> for ViewId {
    fn from(id: u8) -> Self {
        Self(id)
    }
}

bitflags! {
    /// Debug modes. Values match `BGFX_DEBUG_*`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DebugFlags: u32 {
        /// Wireframe rendering for all primitives.
        const WIREFRAME = 1 << 0;
        /// Infinitely fast hardware: skip all draw calls.
        const IFH = 1 << 1;
        /// Statistics overlay.
        const STATS = 1 << 2;
        /// Debug text overlay.
        const TEXT = 1 << 3;
    }
}

impl Default for DebugFlags {
    fn default() -> Self {
        Self::empty()
    }
}

bitflags! {
    /// Buffers cleared before a view renders. Values match `BGFX_CLEAR_*`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u8 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

/// Clear state for one view.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClearSpec {
    pub flags: ClearFlags,
    /// Packed `0xRRGGBBAA`.
    pub rgba: u32,
    /// Depth clear value in `[0, 1]`.
    pub depth: f32,
    pub stencil: u8,
}

impl ClearSpec {
    pub const fn new(flags: ClearFlags, rgba: u32, depth: f32, stencil: u8) -> Self {
        Self {
            flags,
            rgba,
            depth,
            stencil,
        }
    }

    /// Color-only clear.
    pub const fn color(rgba: u32) -> Self {
        Self::new(ClearFlags::COLOR, rgba, 1.0, 0)
    }

    pub const fn with_flags(mut self, flags: ClearFlags) -> Self {
        self.flags = flags;
        self
    }

    pub const fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }

    pub const fn with_stencil(mut self, stencil: u8) -> Self {
        self.stencil = stencil;
        self
    }
}

impl Default for ClearSpec {
    fn default() -> Self {
        Self::new(ClearFlags::COLOR.union(ClearFlags::DEPTH), 0x303030ff, 1.0, 0)
    }
}
