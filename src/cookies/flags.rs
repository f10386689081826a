use crate::base::neterror::NetError;
use std::fmt;
use std::str::FromStr;

/// Read/write permissions of a jar, parsed from a string such as `"rw"`.
///
/// Flags are only consulted by the request layer: a jar without `r` contributes no
/// cookies to outgoing requests and a jar without `w` is not fed `Set-Cookie`
/// headers. Direct calls on the jar ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JarFlags {
    read: bool,
    write: bool,
}

impl JarFlags {
    pub const READ_WRITE: JarFlags = JarFlags {
        read: true,
        write: true,
    };

    pub fn new(read: bool, write: bool) -> Self {
        Self { read, write }
    }

    pub fn readable(&self) -> bool {
        self.read
    }

    pub fn writable(&self) -> bool {
        self.write
    }
}

impl Default for JarFlags {
    fn default() -> Self {
        Self::READ_WRITE
    }
}

impl FromStr for JarFlags {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = JarFlags::new(false, false);
        for c in s.chars() {
            match c {
                'r' => flags.read = true,
                'w' => flags.write = true,
                other => {
                    return Err(NetError::invalid_argument(format!(
                        "Invalid cookie jar flag \"{}\" in \"{}\"!",
                        other, s
                    )))
                }
            }
        }
        Ok(flags)
    }
}

impl fmt::Display for JarFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.read {
            f.write_str("r")?;
        }
        if self.write {
            f.write_str("w")?;
        }
        Ok(())
    }
}
