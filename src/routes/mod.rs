/**
 * Routes Module
 * API route handlers
 */

pub mod catalog;
pub mod contact;
pub mod health;
