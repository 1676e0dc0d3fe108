pub const BANNER: &str = "\
vdl - batch video downloader

Usage:
  vdl https://example.com/a 9.5M https://example.com/b
  or put urls.txt in the output directory, one job per line:
    https://example.com/video 5M 123456

Size formats: 5000K / 5.6M / 1G
Input format: <URL> (size) (2FA code, only with .netrc)";

pub const PROMPT_HINT: &str = "Enter URLs (or 'quit'):";

pub const INPUT_HINT: &str = "Input format: <URL> (size) (2FA code)";
