/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
/// Credential and token grant models
pub mod auth;
/// Transport helpers: authenticated GET/POST returning decoded JSON
pub mod http;
/// Response envelopes and payload models
pub mod responses;
