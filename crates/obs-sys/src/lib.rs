#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]
#![allow(dead_code)]
#![allow(clippy::all)]

pub use libc::{c_char, c_int, c_void};

pub type size_t = libc::size_t;

include!(concat!(env!("OUT_DIR"), "/bindings.rs"));
