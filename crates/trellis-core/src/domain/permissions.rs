/// Capability-based permissions model for generated files.
///
/// Adapters translate this into platform modes; on Unix read-only clears
/// every write bit and executable sets every execute bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    writable: bool,
    executable: bool,
}

impl Permissions {
    pub const fn read_only() -> Self {
        Self {
            writable: false,
            executable: false,
        }
    }

    pub const fn read_write() -> Self {
        Self {
            writable: true,
            executable: false,
        }
    }

    pub const fn new(writable: bool, executable: bool) -> Self {
        Self {
            writable,
            executable,
        }
    }

    pub const fn writable(&self) -> bool {
        self.writable
    }

    pub const fn executable(&self) -> bool {
        self.executable
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::read_write()
    }
}
