//! Platform-aware path decomposition
//!
//! Paths in a resolution context are host strings, not `std::path::Path`s:
//! a Windows session may be resolved on a Unix machine and vice versa, so
//! decomposition follows the session's [`Platform`] rather than the build target.

use crate::platform::Platform;

impl Platform {
    /// Splits `path` into its root (`/`, `C:`, `C:\`, `\`) and the remainder.
    fn split_root(self, path: &str) -> (&str, &str) {
        let bytes = path.as_bytes();
        match self {
            Self::Posix => {
                if path.starts_with('/') {
                    path.split_at(1)
                } else {
                    ("", path)
                }
            }
            Self::Windows => {
                let mut root_len = 0;
                if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
                    root_len = 2;
                }
                if bytes.get(root_len).is_some_and(|b| *b == b'/' || *b == b'\\') {
                    root_len += 1;
                }
                path.split_at(root_len)
            }
        }
    }

    fn trim_trailing_separators(self, path: &str) -> &str {
        path.trim_end_matches(|c| self.is_separator(c))
    }

    /// Last component of `path`, ignoring trailing separators.
    #[must_use]
    pub fn basename(self, path: &str) -> String {
        let (_, rest) = self.split_root(path);
        let rest = self.trim_trailing_separators(rest);
        rest.rsplit(|c| self.is_separator(c))
            .next()
            .unwrap_or_default()
            .to_string()
    }

    /// Everything before the last component; `.` for a bare relative name.
    #[must_use]
    pub fn dirname(self, path: &str) -> String {
        let (root, rest) = self.split_root(path);
        let rest = self.trim_trailing_separators(rest);

        let Some(idx) = rest.rfind(|c| self.is_separator(c)) else {
            return if root.is_empty() { ".".to_string() } else { root.to_string() };
        };

        let dir = self.trim_trailing_separators(&rest[..idx]);
        if dir.is_empty() {
            if root.is_empty() { ".".to_string() } else { root.to_string() }
        } else {
            format!("{root}{dir}")
        }
    }

    /// Extension of the last component including the dot, or empty.
    #[must_use]
    pub fn extname(self, path: &str) -> String {
        let base = self.basename(path);
        if base.chars().all(|c| c == '.') {
            return String::new();
        }
        match base.rfind('.') {
            Some(idx) if idx > 0 => base[idx..].to_string(),
            _ => String::new(),
        }
    }

    /// Last component with its extension removed.
    #[must_use]
    pub fn basename_no_extension(self, path: &str) -> String {
        let base = self.basename(path);
        let ext_len = self.extname(&base).len();
        base[..base.len() - ext_len].to_string()
    }

    /// Path of `to` relative to `from`.
    ///
    /// When the two paths do not share a root (different drives), `to` is
    /// returned unchanged.
    #[must_use]
    pub fn relative(self, from: &str, to: &str) -> String {
        let (from_root, from_rest) = self.split_root(from);
        let (to_root, to_rest) = self.split_root(to);

        if !self.same_component(&self.unify_separators(from_root), &self.unify_separators(to_root)) {
            return to.to_string();
        }

        let from_parts = self.components(from_rest);
        let to_parts = self.components(to_rest);

        let common = from_parts
            .iter()
            .zip(&to_parts)
            .take_while(|(a, b)| self.same_component(a, b))
            .count();

        let mut out: Vec<&str> = vec![".."; from_parts.len() - common];
        out.extend(to_parts[common..].iter().copied());
        out.join(&self.separator().to_string())
    }

    fn components(self, path: &str) -> Vec<&str> {
        let mut parts = Vec::new();
        for part in path.split(|c| self.is_separator(c)) {
            match part {
                "" | "." => {}
                ".." => {
                    if parts.last().is_some_and(|p| *p != "..") {
                        parts.pop();
                    } else {
                        parts.push(part);
                    }
                }
                _ => parts.push(part),
            }
        }
        parts
    }

    fn unify_separators(self, path: &str) -> String {
        path.chars()
            .map(|c| if self.is_separator(c) { self.separator() } else { c })
            .collect()
    }

    fn same_component(self, a: &str, b: &str) -> bool {
        if self.is_case_insensitive() {
            a.eq_ignore_ascii_case(b)
        } else {
            a == b
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_posix_basename() {
        let p = Platform::Posix;
        assert_eq!(p.basename("/home/user/main.qasm"), "main.qasm");
        assert_eq!(p.basename("/home/user/"), "user");
        assert_eq!(p.basename("main.qasm"), "main.qasm");
        assert_eq!(p.basename("/"), "");
    }

    #[test]
    fn test_posix_dirname() {
        let p = Platform::Posix;
        assert_eq!(p.dirname("/home/user/main.qasm"), "/home/user");
        assert_eq!(p.dirname("/main.qasm"), "/");
        assert_eq!(p.dirname("main.qasm"), ".");
        assert_eq!(p.dirname("/"), "/");
        assert_eq!(p.dirname("a/b/"), "a");
    }

    #[test]
    fn test_extname() {
        let p = Platform::Posix;
        assert_eq!(p.extname("/src/circuit.qasm"), ".qasm");
        assert_eq!(p.extname("/src/archive.tar.gz"), ".gz");
        assert_eq!(p.extname("/src/.hidden"), "");
        assert_eq!(p.extname("/src/Makefile"), "");
        assert_eq!(p.extname("/src/trailing."), ".");
        assert_eq!(p.extname(".."), "");
    }

    #[test]
    fn test_basename_no_extension() {
        let p = Platform::Posix;
        assert_eq!(p.basename_no_extension("/src/circuit.qasm"), "circuit");
        assert_eq!(p.basename_no_extension("/src/.hidden"), ".hidden");
        assert_eq!(p.basename_no_extension("/src/archive.tar.gz"), "archive.tar");
    }

    #[test]
    fn test_windows_decomposition() {
        let p = Platform::Windows;
        assert_eq!(p.basename("C:\\proj\\src\\main.py"), "main.py");
        assert_eq!(p.dirname("C:\\proj\\src\\main.py"), "C:\\proj\\src");
        assert_eq!(p.dirname("C:\\main.py"), "C:\\");
        assert_eq!(p.basename("C:/proj/mixed\\file.txt"), "file.txt");
        assert_eq!(p.basename("C:\\"), "");
    }

    #[test]
    fn test_posix_relative() {
        let p = Platform::Posix;
        assert_eq!(p.relative("/proj", "/proj/src/main.qasm"), "src/main.qasm");
        assert_eq!(p.relative("/proj/a", "/proj/b/c.txt"), "../b/c.txt");
        assert_eq!(p.relative("/proj", "/proj"), "");
        assert_eq!(p.relative("/proj/", "/proj/./x/../y"), "y");
    }

    #[test]
    fn test_windows_relative() {
        let p = Platform::Windows;
        assert_eq!(p.relative("c:\\Proj", "C:\\proj\\src\\main.py"), "src\\main.py");
        assert_eq!(p.relative("C:\\proj", "D:\\other\\x.py"), "D:\\other\\x.py");
    }
}
