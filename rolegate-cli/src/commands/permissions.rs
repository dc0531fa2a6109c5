//! `rolegate permissions`: direct permission grants for a user

use anyhow::{bail, Result};

use super::{parse_name_list, CommandContext};

pub async fn execute(
    ctx: &CommandContext,
    userid: Option<i32>,
    permissions: Option<String>,
    append: bool,
    list: bool,
) -> Result<()> {
    if list {
        for name in ctx.facade.list_permissions() {
            println!("{}", name);
        }
        return Ok(());
    }

    let Some(user_id) = userid else {
        bail!("--userid is required unless --list is given");
    };
    let Some(raw) = permissions else {
        bail!("--permissions is required unless --list is given");
    };
    let names = parse_name_list(&raw);

    let held = if append {
        ctx.service.union_user_permissions(user_id, &names).await?
    } else {
        ctx.service.replace_user_permissions(user_id, &names).await?
    };

    println!("User {} permissions:", user_id);
    for name in held {
        println!("  {}", name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_context;

    #[tokio::test]
    async fn test_missing_userid_without_list_fails() {
        let (ctx, _) = test_context(&["edit posts"]).await;
        let result = execute(&ctx, None, Some("edit posts".to_string()), false, false).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_replace_sets_exact_grants() {
        let (ctx, user_id) = test_context(&["edit posts", "delete posts"]).await;
        ctx.service
            .replace_user_permissions(user_id, &["delete posts".to_string()])
            .await
            .unwrap();

        execute(&ctx, Some(user_id), Some("edit posts".to_string()), false, false)
            .await
            .unwrap();

        let held = ctx.facade.user_permissions(user_id).await.unwrap();
        assert_eq!(held, vec!["edit posts".to_string()]);
    }

    #[tokio::test]
    async fn test_append_unions_grants() {
        let (ctx, user_id) = test_context(&["edit posts", "delete posts"]).await;
        execute(&ctx, Some(user_id), Some("edit posts".to_string()), false, false)
            .await
            .unwrap();
        execute(&ctx, Some(user_id), Some("delete posts".to_string()), true, false)
            .await
            .unwrap();

        let held = ctx.facade.user_permissions(user_id).await.unwrap();
        assert_eq!(held, vec!["edit posts".to_string(), "delete posts".to_string()]);
    }

    #[tokio::test]
    async fn test_list_needs_no_userid() {
        let (ctx, _) = test_context(&["edit posts"]).await;
        execute(&ctx, None, None, false, true).await.unwrap();
    }
}
