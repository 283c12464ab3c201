mod common;
mod recommend;
mod service;
