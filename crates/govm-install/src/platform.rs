use std::env::consts;
use std::fmt;

/// Operating system and architecture as Go names them (`darwin`, `arm64`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
    pub os:   String,
    pub arch: String,
}

impl Platform {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self { os: os.into(), arch: arch.into() }
    }

    /// The platform this binary was built for.
    pub fn host() -> Self { Self::new(go_os(consts::OS), go_arch(consts::ARCH)) }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}-{}", self.os, self.arch) }
}

fn go_os(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

fn go_arch(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        "arm" => "armv6l",
        "loongarch64" => "loong64",
        "powerpc64" if cfg!(target_endian = "little") => "ppc64le",
        "powerpc64" => "ppc64",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_names() {
        assert_eq!(go_os("macos"), "darwin");
        assert_eq!(go_os("linux"), "linux");
        assert_eq!(go_os("windows"), "windows");
        assert_eq!(go_os("freebsd"), "freebsd");
    }

    #[test]
    fn arch_names() {
        assert_eq!(go_arch("x86_64"), "amd64");
        assert_eq!(go_arch("aarch64"), "arm64");
        assert_eq!(go_arch("x86"), "386");
        assert_eq!(go_arch("arm"), "armv6l");
        assert_eq!(go_arch("s390x"), "s390x");
    }

    #[test]
    fn host_uses_go_names() {
        let host = Platform::host();
        assert_ne!(host.os, "macos");
        assert_ne!(host.arch, "x86_64");
        assert_ne!(host.arch, "aarch64");
    }

    #[test]
    fn display() {
        assert_eq!(Platform::new("linux", "amd64").to_string(), "linux-amd64");
    }
}
