//! CLI module - Command-line interface for Lectern
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Lectern - courses and blog server
#[derive(Parser)]
#[command(name = "lectern")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Create a user account
    CreateUser {
        username: String,
        /// Generated and printed when omitted
        #[arg(long)]
        password: Option<String>,
        /// Grant access to the admin registry
        #[arg(long)]
        staff: bool,
        /// Short description of the author
        #[arg(long, default_value = "")]
        bio: String,
    },

    /// Replace a user's biography
    SetBio { username: String, bio: String },

    /// Seed a demo instructor, course and blog post
    Demo,

    /// Show every registered admin model
    Admin,

    /// List all courses with enrollment counts
    #[command(alias = "ls")]
    Courses,

    /// Publish a course, or hide it with --hide
    Publish {
        slug: String,
        #[arg(long)]
        hide: bool,
    },

    /// List blog posts in admin order
    Posts,
}

pub use commands::*;
