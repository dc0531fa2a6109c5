//! `rolegate user-role`: role assignments for a user

use anyhow::{bail, Result};

use super::{parse_name_list, CommandContext};

pub async fn execute(
    ctx: &CommandContext,
    userid: Option<i32>,
    roles: Option<String>,
    append: bool,
    list: bool,
) -> Result<()> {
    let Some(user_id) = userid else {
        bail!("--userid is required");
    };

    if list {
        println!("User {} roles:", user_id);
        for role in ctx.facade.user_roles(user_id).await? {
            println!("  {}", role.name);
        }
        return Ok(());
    }

    let Some(raw) = roles else {
        bail!("--roles is required unless --list is given");
    };
    let names = parse_name_list(&raw);

    let held = if append {
        ctx.service.union_user_roles(user_id, &names).await?
    } else {
        ctx.service.replace_user_roles(user_id, &names).await?
    };

    println!("User {} roles:", user_id);
    for role in held {
        println!("  {}", role.name);
    }
    Ok(())
}
