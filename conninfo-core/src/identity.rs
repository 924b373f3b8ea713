//! Operating system user lookup.

use tracing::debug;

/// Name of the user the process runs as, from the password database.
///
/// Returns `None` when the lookup fails; callers treat that as "unknown"
/// rather than an error.
#[cfg(unix)]
pub fn current_username() -> Option<String> {
    use std::ffi::CStr;

    const MAX_BUFFER: usize = 1 << 16;

    // SAFETY: geteuid has no preconditions and cannot fail.
    let uid = unsafe { libc::geteuid() };
    let mut buf: Vec<libc::c_char> = vec![0; 1024];

    loop {
        // SAFETY: an all-zero passwd is a valid value for getpwuid_r to overwrite.
        let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::passwd = std::ptr::null_mut();

        // SAFETY: every pointer refers to live, correctly sized storage owned
        // by this frame, and buf.len() is the true capacity of buf.
        let rc = unsafe {
            libc::getpwuid_r(uid, &mut pwd, buf.as_mut_ptr(), buf.len(), &mut result)
        };

        if rc == libc::ERANGE && buf.len() < MAX_BUFFER {
            buf.resize(buf.len() * 2, 0);
            continue;
        }

        if rc != 0 || result.is_null() || pwd.pw_name.is_null() {
            debug!(uid, rc, "user lookup failed");
            return None;
        }

        // SAFETY: pw_name points into buf, NUL-terminated by getpwuid_r.
        let name = unsafe { CStr::from_ptr(pwd.pw_name) };
        return name.to_str().ok().map(str::to_string);
    }
}

/// Name of the user the process runs as.
#[cfg(not(unix))]
pub fn current_username() -> Option<String> {
    let name = std::env::var("USERNAME").ok();
    if name.is_none() {
        debug!("user lookup failed");
    }
    name
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_does_not_panic() {
        if let Some(name) = current_username() {
            assert!(!name.is_empty());
            assert!(!name.contains('\0'));
        }
    }
}
