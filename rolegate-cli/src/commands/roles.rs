//! `rolegate roles`: role catalog and matrix rows

use anyhow::{bail, Result};

use super::{parse_name_list, CommandContext};

pub async fn execute(
    ctx: &CommandContext,
    role_name: Option<String>,
    permissions: Option<String>,
    append: bool,
    list: bool,
    describe: bool,
) -> Result<()> {
    if list {
        for role in ctx.facade.list_roles().await? {
            println!("{}\t{}", role.id, role.name);
        }
        return Ok(());
    }

    if describe {
        let Some(name) = role_name else {
            bail!("--role-name is required with --describe");
        };
        println!("Role '{}' permissions:", name);
        for permission in ctx.facade.role_permissions(&name).await? {
            println!("  {}", permission);
        }
        return Ok(());
    }

    let Some(name) = role_name else {
        bail!("--role-name is required unless --list is given");
    };
    let Some(raw) = permissions else {
        bail!("--permissions is required unless --list or --describe is given");
    };
    let names = parse_name_list(&raw);

    let role = ctx.service.ensure_role(&name).await?;
    let enabled = if append {
        ctx.service.union_role_permissions(role.id, &names).await?
    } else {
        ctx.service.replace_role_permissions(role.id, &names).await?
    };

    println!("Role '{}' permissions:", role.name);
    for permission in enabled {
        println!("  {}", permission);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_context;

    #[tokio::test]
    async fn test_describe_unknown_role_fails() {
        let (ctx, _) = test_context(&["edit posts"]).await;
        let result = execute(&ctx, Some("ghost".to_string()), None, false, false, true).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_assignment_creates_role_and_sets_row() {
        let (ctx, _) = test_context(&["edit posts", "delete posts"]).await;
        execute(
            &ctx,
            Some("editor".to_string()),
            Some("edit posts".to_string()),
            false,
            false,
            false,
        )
        .await
        .unwrap();

        assert_eq!(
            ctx.facade.role_permissions("editor").await.unwrap(),
            vec!["edit posts".to_string()]
        );
    }

    #[tokio::test]
    async fn test_replace_disables_unlisted_permissions() {
        let (ctx, _) = test_context(&["edit posts", "delete posts"]).await;
        execute(
            &ctx,
            Some("editor".to_string()),
            Some("edit posts, delete posts".to_string()),
            false,
            false,
            false,
        )
        .await
        .unwrap();
        execute(
            &ctx,
            Some("editor".to_string()),
            Some("delete posts".to_string()),
            false,
            false,
            false,
        )
        .await
        .unwrap();

        assert_eq!(
            ctx.facade.role_permissions("editor").await.unwrap(),
            vec!["delete posts".to_string()]
        );
    }

    #[tokio::test]
    async fn test_missing_role_name_fails() {
        let (ctx, _) = test_context(&["edit posts"]).await;
        let result = execute(&ctx, None, Some("edit posts".to_string()), false, false, false).await;
        assert!(result.is_err());
    }
}
