use forum_app::domain::{FavouritePostView, Member, PollVoteResult};
use forum_app::infrastructure::localization::Localizer;
use std::fmt::Write;

/// Poll fragment swapped into the topic page after a vote.
pub fn poll_partial(result: &PollVoteResult, localizer: &Localizer) -> String {
    let total = result.total_votes;
    let mut answers = String::new();
    for answer in &result.poll.answers {
        let pct = answer.percentage(total);
        let _ = write!(
            answers,
            r#"<li class="poll__answer" data-answer-id="{id}">
                <span class="poll__text">{text}</span>
                <span class="poll__bar"><span class="poll__fill" style="width:{pct}%"></span></span>
                <span class="poll__count">{votes} ({pct}%)</span>
            </li>"#,
            id = answer.id,
            text = escape_html(&answer.answer),
            pct = pct,
            votes = answer.votes,
        );
    }

    let voted = if result.already_voted {
        format!(
            r#"<p class="poll__voted">{}</p>"#,
            escape_html(&localizer.get("Poll.Voted"))
        )
    } else {
        String::new()
    };

    format!(
        r#"<div class="poll" id="poll-{id}" data-poll-id="{id}">
    <ul class="poll__answers">{answers}</ul>
    <p class="poll__total">{total_label}: <strong>{total}</strong></p>
    {voted}
</div>"#,
        id = result.poll.id,
        answers = answers,
        total_label = escape_html(&localizer.get("Poll.TotalVotes")),
        total = total,
        voted = voted,
    )
}

pub fn favourites_page(member: &Member, posts: &[FavouritePostView], localizer: &Localizer) -> String {
    let title = escape_html(&localizer.get("Favourites.Title"));

    let body = if posts.is_empty() {
        format!(
            r#"<p class="favourites__empty">{}</p>"#,
            escape_html(&localizer.get("Favourites.Empty"))
        )
    } else {
        let votes_label = escape_html(&localizer.get("Post.Votes"));
        let favourites_label = escape_html(&localizer.get("Post.Favourites"));
        let mut items = String::new();
        for post in posts {
            let topic = if post.show_topic_name {
                format!(
                    r#"<a href="/topics/{id}" class="post__topic">{name}</a>"#,
                    id = post.topic_id,
                    name = escape_html(&post.topic_name),
                )
            } else {
                String::new()
            };
            let permissions = post
                .permissions
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(",");
            let posted = post
                .posted_at
                .map(|at| at.format("%d %b %Y").to_string())
                .unwrap_or_default();

            let _ = write!(
                items,
                r#"<article class="post" id="post-{id}" data-permissions="{permissions}">
                {topic}
                <div class="post__content">{content}</div>
                <footer class="post__meta">
                    <time>{posted}</time>
                    <span class="post__votes">+{up} / -{down} {votes_label}</span>
                    <span class="post__favourites">{favourites} {favourites_label}</span>
                </footer>
            </article>"#,
                id = post.post_id,
                permissions = escape_html(&permissions),
                topic = topic,
                content = escape_html(&post.content),
                posted = posted,
                up = post.up_votes,
                down = post.down_votes,
                votes_label = votes_label,
                favourites = post.favourite_count,
                favourites_label = favourites_label,
            );
        }
        format!(r#"<div class="favourites">{items}</div>"#)
    };

    page(
        &title,
        &format!(
            r#"<h1 class="page__title">{title}</h1>
        <p class="page__member">{member}</p>
        {body}"#,
            title = title,
            member = escape_html(&member.username),
            body = body,
        ),
    )
}

pub fn error_page(message: &str) -> String {
    page(
        "Error",
        &format!(
            r#"<div class="error"><p class="error__message">{}</p></div>"#,
            escape_html(message)
        ),
    )
}

fn page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <style>{CSS}</style>
</head>
<body>
    <main class="container">
        {content}
    </main>
</body>
</html>"#,
        title = title,
        content = content,
        CSS = CSS,
    )
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const CSS: &str = r#"
:root {
    --base: #faf4ed;
    --surface: #fffaf3;
    --overlay: #f2e9e1;
    --muted: #9893a5;
    --subtle: #797593;
    --text: #575279;
    --love: #b4637a;
    --gold: #ea9d34;
    --pine: #286983;
}
* { box-sizing: border-box; margin: 0; padding: 0; }
body { font-family: 'Inter', -apple-system, sans-serif; background: var(--base); color: var(--text); min-height: 100vh; }
.container { max-width: 800px; margin: 0 auto; padding: 1.5rem; }
.page__title { color: var(--pine); font-size: 1.6rem; margin-bottom: 0.25rem; }
.page__member { color: var(--subtle); margin-bottom: 1.5rem; }
.post { background: var(--surface); border: 2px solid var(--overlay); border-radius: 12px; padding: 1.25rem; margin-bottom: 1rem; }
.post__topic { display: block; color: var(--love); font-weight: 700; margin-bottom: 0.5rem; text-decoration: none; }
.post__content { line-height: 1.7; white-space: pre-wrap; }
.post__meta { display: flex; gap: 1rem; margin-top: 0.75rem; color: var(--muted); font-size: 0.9rem; }
.favourites__empty { color: var(--subtle); font-style: italic; }
.poll__answers { list-style: none; }
.poll__answer { display: grid; grid-template-columns: 1fr 2fr auto; gap: 0.75rem; align-items: center; margin-bottom: 0.5rem; }
.poll__bar { background: var(--overlay); border-radius: 4px; height: 0.75rem; overflow: hidden; }
.poll__fill { display: block; height: 100%; background: var(--gold); }
.poll__total { margin-top: 0.75rem; }
.poll__voted { color: var(--pine); margin-top: 0.25rem; }
.error { background: #fce8ec; border: 2px solid var(--love); border-radius: 8px; padding: 1.25rem; margin: 2rem 0; }
.error__message { color: #8b3d4d; }
"#;
