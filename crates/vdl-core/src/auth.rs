//! Optional credential files living in the output directory.
//!
//! `.netrc` enables authenticated fetches and the auth-code token in the
//! parser; `cookies.txt` (Netscape format) is passed through as-is.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const NETRC_FILE: &str = ".netrc";
pub const COOKIES_FILE: &str = "cookies.txt";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthFiles {
    pub netrc: Option<PathBuf>,
    pub cookies: Option<PathBuf>,
}

impl AuthFiles {
    /// Looks for the credential files in `dir`.
    pub fn discover(dir: &Path) -> Self {
        let existing = |name: &str| {
            let p = dir.join(name);
            p.is_file().then_some(p)
        };
        Self {
            netrc: existing(NETRC_FILE),
            cookies: existing(COOKIES_FILE),
        }
    }

    /// Whether the parser should read an auth code after a URL (and size).
    pub fn auth_codes_enabled(&self) -> bool {
        self.netrc.is_some()
    }

    /// yt-dlp options for these files. The two-factor code is only passed
    /// alongside a `.netrc`, since that is the only login it applies to.
    pub fn fetch_args(&self, auth_code: Option<&str>) -> Vec<OsString> {
        let mut args = Vec::new();
        if let Some(cookies) = &self.cookies {
            args.push("--cookies".into());
            args.push(cookies.into());
        }
        if let Some(netrc) = &self.netrc {
            args.push("--netrc-location".into());
            args.push(netrc.into());
            if let Some(code) = auth_code {
                args.push("--twofactor".into());
                args.push(code.into());
            }
        }
        args
    }
}
