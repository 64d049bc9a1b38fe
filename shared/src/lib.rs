//! Wire types shared between the calendar frontend and the backend API.

pub mod api;
