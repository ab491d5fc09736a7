use std::ffi::{c_char, CString};

use crate::error::Result;

// Pointers are only valid while the array is alive; keep it in scope across
// the driver call that reads them.
pub(crate) struct NameArray {
    _names: Vec<CString>,
    pointers: Vec<*const c_char>,
}

impl NameArray {
    pub(crate) fn new<'a, I>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names = names
            .into_iter()
            .map(CString::new)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let pointers = names.iter().map(|name| name.as_ptr()).collect();

        Ok(Self {
            _names: names,
            pointers,
        })
    }

    pub(crate) fn as_ptrs(&self) -> &[*const c_char] {
        &self.pointers
    }

    pub(crate) fn len(&self) -> usize {
        self.pointers.len()
    }
}
