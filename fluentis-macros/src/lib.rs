use proc_macro::{Delimiter, Group, TokenStream, TokenTree};

/// Rewrites an `async fn` item so its body runs under
/// `::fluentis::sync_wait`, panicking with `expect_message` if the task
/// fails.
fn wrap_sync_wait(item: TokenStream, expect_message: &str) -> TokenStream {
    let mut tokens: Vec<TokenTree> = item.into_iter().collect();

    if let Some(pos) = tokens
        .iter()
        .position(|t| matches!(t, TokenTree::Ident(id) if id.to_string() == "async"))
    {
        tokens.remove(pos);
    }

    let Some(pos) = tokens.iter().rposition(
        |t| matches!(t, TokenTree::Group(g) if g.delimiter() == Delimiter::Brace),
    ) else {
        return TokenStream::new();
    };

    let block = match &tokens[pos] {
        TokenTree::Group(group) => group.stream().to_string(),
        _ => unreachable!(),
    };

    let new_block = format!(
        "{{
            ::fluentis::sync_wait(async move {{ {} }}).expect(\"{}\")
        }}",
        block, expect_message
    );

    tokens[pos] = TokenTree::Group(Group::new(Delimiter::Brace, new_block.parse().unwrap()));

    tokens.into_iter().collect()
}

#[proc_macro_attribute]
pub fn main(_attr: TokenStream, item: TokenStream) -> TokenStream {
    wrap_sync_wait(item, "main task failed")
}

#[proc_macro_attribute]
pub fn test(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let wrapped = wrap_sync_wait(item, "test task failed");

    let test_attr: TokenStream = "#[test]".parse().unwrap();
    let mut result: Vec<TokenTree> = test_attr.into_iter().collect();
    result.extend(wrapped);

    result.into_iter().collect()
}
