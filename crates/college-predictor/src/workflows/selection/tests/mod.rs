mod common;
mod compare;
