//! Python file generators.

mod client_py;

pub use client_py::ClientPy;
