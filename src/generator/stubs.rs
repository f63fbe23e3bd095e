//! Built-in artifact stubs and project overrides.
//!
//! Stubs ship inside the binary. A project can replace any of them by placing a file
//! with the same relative name under its stubs directory (`stubs/crud-generator/` by
//! default), which is what `crudgen publish-stubs` populates.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use crate::error::CrudError;

/// A stub compiled into the binary
#[derive(Debug, Clone, Copy)]
pub struct Stub {
    /// Relative file name, also the override lookup key (`views/index.blade.stub`)
    pub name: &'static str,
    /// Default contents
    pub contents: &'static str,
}

/// Every built-in stub, in publication order
pub const BUILTIN_STUBS: &[Stub] = &[
    Stub {
        name: "model.stub",
        contents: include_str!("../../stubs/model.stub"),
    },
    Stub {
        name: "migration.stub",
        contents: include_str!("../../stubs/migration.stub"),
    },
    Stub {
        name: "request.store.stub",
        contents: include_str!("../../stubs/request.store.stub"),
    },
    Stub {
        name: "request.update.stub",
        contents: include_str!("../../stubs/request.update.stub"),
    },
    Stub {
        name: "controller.stub",
        contents: include_str!("../../stubs/controller.stub"),
    },
    Stub {
        name: "api_controller.stub",
        contents: include_str!("../../stubs/api_controller.stub"),
    },
    Stub {
        name: "api_resource.stub",
        contents: include_str!("../../stubs/api_resource.stub"),
    },
    Stub {
        name: "views/index.blade.stub",
        contents: include_str!("../../stubs/views/index.blade.stub"),
    },
    Stub {
        name: "views/create.blade.stub",
        contents: include_str!("../../stubs/views/create.blade.stub"),
    },
    Stub {
        name: "views/edit.blade.stub",
        contents: include_str!("../../stubs/views/edit.blade.stub"),
    },
    Stub {
        name: "views/show.blade.stub",
        contents: include_str!("../../stubs/views/show.blade.stub"),
    },
    Stub {
        name: "views/_form.blade.stub",
        contents: include_str!("../../stubs/views/_form.blade.stub"),
    },
];

/// Look up a built-in stub by name
pub fn builtin(name: &str) -> Option<&'static str> {
    BUILTIN_STUBS
        .iter()
        .find(|stub| stub.name == name)
        .map(|stub| stub.contents)
}

/// Load a stub, preferring `override_dir/<name>` when that file exists.
///
/// # Errors
///
/// Returns [`CrudError::Io`] when an override exists but cannot be read, or when the
/// name matches no built-in stub and no override.
pub fn load_stub(name: &str, override_dir: Option<&Path>) -> Result<Cow<'static, str>, CrudError> {
    if let Some(dir) = override_dir {
        let candidate = dir.join(name);
        if candidate.is_file() {
            tracing::debug!(stub = name, path = %candidate.display(), "using project stub override");
            let contents = fs::read_to_string(&candidate)
                .map_err(|e| CrudError::io("read stub", &candidate, e))?;
            return Ok(Cow::Owned(contents));
        }
    }
    builtin(name).map(Cow::Borrowed).ok_or_else(|| {
        CrudError::io(
            "find stub",
            name,
            std::io::Error::new(std::io::ErrorKind::NotFound, "no built-in stub with this name"),
        )
    })
}
