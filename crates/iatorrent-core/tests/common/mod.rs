#![allow(dead_code)]

pub mod torrent_server;
