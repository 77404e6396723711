//! Admin registry command handler

use crate::admin::default_site;

pub fn cmd_admin() {
    let site = default_site();

    println!("Registered models ({} total)", site.len());
    println!("{:-<70}", "");

    for admin in site.iter() {
        print!("{admin}");
    }
}
