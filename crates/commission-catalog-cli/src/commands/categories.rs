use serde_json::json;

use commission_catalog::find_category;

use super::{resolve_tree, Context, TreeOrigin};
use crate::output;

pub async fn list(ctx: &Context, source: Option<&str>, offline: bool) -> anyhow::Result<()> {
    let (tree, origin) = resolve_tree(ctx, source, offline).await?;

    if ctx.json {
        return output::print_json(&json!({ "origin": origin, "categories": tree }));
    }

    println!("{}", output::describe_origin(&origin));
    println!();
    output::print_tree(&tree);
    Ok(())
}

pub async fn find(ctx: &Context, id: i64, source: Option<&str>) -> anyhow::Result<()> {
    let (tree, origin) = resolve_tree(ctx, source, false).await?;
    let found = find_category(&tree, id).ok_or_else(|| {
        anyhow::anyhow!("category {id} not found ({})", output::describe_origin(&origin))
    })?;

    if ctx.json {
        return output::print_json(&json!({
            "category": found.category,
            "parent": found.parent.map(|p| json!({ "id": p.id, "name": p.name })),
            "path": found.display_path(),
        }));
    }

    println!("{}", found.display_path());
    println!("  id:         {}", found.category.id);
    println!("  commission: {}%", output::rate(found.category.commission_rate));
    if !found.category.sub_categories.is_empty() {
        println!("  subcategories: {}", found.category.sub_categories.len());
    }
    if let TreeOrigin::SourceFallback { .. } = origin {
        println!("  ({})", output::describe_origin(&origin));
    }
    Ok(())
}
