//! Capabilities a domain object can offer to the renderer.
//!
//! A type that knows how to print itself as a list implements [`Listable`];
//! one that prints a detailed view implements [`Describable`]. The renderer
//! wraps either action in a callback and runs it as the last render step.

use std::io::{self, Write};

use crate::profile::Profile;

/// Prints an object as a list (one or more summary lines).
pub trait Listable {
    fn list(&self, out: &mut dyn Write, profile: &Profile) -> io::Result<()>;
}

/// Prints an object in detail.
pub trait Describable {
    fn describe(&self, out: &mut dyn Write, profile: &Profile) -> io::Result<()>;
}

impl<T: Listable> Listable for [T] {
    fn list(&self, out: &mut dyn Write, profile: &Profile) -> io::Result<()> {
        for item in self {
            item.list(out, profile)?;
        }
        Ok(())
    }
}

impl<T: Listable> Listable for Vec<T> {
    fn list(&self, out: &mut dyn Write, profile: &Profile) -> io::Result<()> {
        self.as_slice().list(out, profile)
    }
}
