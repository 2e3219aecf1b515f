mod headers;
mod pages;
mod persistence;
mod session;
mod share;
