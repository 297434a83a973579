//! Embedded minijinja environment.
//!
//! Templates are compiled into the binary with `include_str!`, so the server
//! ships as a single file with no asset directory to deploy.

use minijinja::Environment;

pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("base.html", include_str!("../templates/base.html"))?;
    env.add_template("list.html", include_str!("../templates/list.html"))?;
    env.add_template(
        "update_task.html",
        include_str!("../templates/update_task.html"),
    )?;
    env.add_template("delete.html", include_str!("../templates/delete.html"))?;
    Ok(env)
}
