//! Application components.

use crate::routing::Route;
use crate::store::{CurrentUserState, Post, PostsState, User};
use crate::ui::node::{Node, el};
use crate::ui::{Component, RenderContext, RenderError};

/// Links shown in the side navigation.
const NAV_LINKS: &[(&str, &str)] = &[("/", "Home"), ("/posts", "Posts"), ("/about", "About")];

/// Root component: navigation plus the page for the current route.
#[derive(Debug, Default, Clone, Copy)]
pub struct App;

impl Component for App {
    fn name(&self) -> &'static str {
        "App"
    }

    fn render(&self, cx: &RenderContext<'_>) -> Result<Node, RenderError> {
        let props = cx.props();
        let route = props.navigation.route.as_ref();

        let page = match route {
            Some(Route::Home) => cx.render(&HomePage { user: props.current_user.user.as_ref() })?,
            Some(Route::Posts) => cx.render(&PostList { posts: &props.posts })?,
            Some(Route::Post { id }) => cx.render(&PostDetail { id: *id, posts: &props.posts })?,
            Some(Route::About) => cx.render(&AboutPage)?,
            Some(Route::NotFound) => cx.render(&NotFoundPage {
                path: props.navigation.path.as_deref().unwrap_or("/"),
            })?,
            // Nothing parsed yet.
            None => Node::Fragment(Vec::new()),
        };

        Ok(el("div")
            .class("app")
            .child(el("header").child(cx.render(&Navigation {
                active: route,
                session: &props.current_user,
            })?))
            .child(el("main").child(el("div").class("container").child(page)))
            .child(el("footer").class("page-footer teal darken-2"))
            .into())
    }
}

pub struct Navigation<'a> {
    pub active: Option<&'a Route>,
    pub session: &'a CurrentUserState,
}

impl Navigation<'_> {
    fn is_active(&self, href: &str) -> bool {
        matches!(
            (self.active, href),
            (Some(Route::Home), "/") | (Some(Route::Posts | Route::Post { .. }), "/posts") | (Some(Route::About), "/about")
        )
    }
}

impl Component for Navigation<'_> {
    fn name(&self) -> &'static str {
        "Navigation"
    }

    fn validate(&self) -> Result<(), String> {
        match NAV_LINKS.iter().find(|(href, _)| !href.starts_with('/')) {
            Some((href, _)) => Err(format!("link '{}' is not an absolute path", href)),
            None => Ok(()),
        }
    }

    fn render(&self, cx: &RenderContext<'_>) -> Result<Node, RenderError> {
        let links = NAV_LINKS.iter().map(|(href, label)| {
            let item = el("li").child(el("a").attr("href", *href).text(*label));
            if self.is_active(href) {
                item.class("active")
            } else {
                item
            }
        });

        let badge = match &self.session.user {
            Some(user) => cx.render(&UserBadge { user })?,
            None => el("span").class("guest").text("Guest").into(),
        };

        Ok(el("nav")
            .child(
                el("div")
                    .class("nav-wrapper teal")
                    .child(el("a").attr("href", "/").class("brand-logo").text("Universal"))
                    .child(el("a").attr("href", "#").attr("data-activates", "slide-out").class("button-collapse").text("☰")),
            )
            .child(
                el("ul")
                    .attr("id", "slide-out")
                    .class("side-nav fixed")
                    .child(el("li").class("user").child(badge))
                    .children(links),
            )
            .into())
    }
}

pub struct UserBadge<'a> {
    pub user: &'a User,
}

impl Component for UserBadge<'_> {
    fn name(&self) -> &'static str {
        "UserBadge"
    }

    fn validate(&self) -> Result<(), String> {
        if self.user.name.trim().is_empty() {
            return Err(format!("user {} has an empty name", self.user.id));
        }
        Ok(())
    }

    fn render(&self, _cx: &RenderContext<'_>) -> Result<Node, RenderError> {
        Ok(el("span")
            .class("user-badge")
            .text(format!("Signed in as {}", self.user.name))
            .into())
    }
}

pub struct HomePage<'a> {
    pub user: Option<&'a User>,
}

impl Component for HomePage<'_> {
    fn name(&self) -> &'static str {
        "HomePage"
    }

    fn render(&self, _cx: &RenderContext<'_>) -> Result<Node, RenderError> {
        let greeting = match self.user {
            Some(user) => format!("Welcome back, {}.", user.name),
            None => "Welcome.".to_string(),
        };
        Ok(el("section")
            .class("home")
            .child(el("h1").text("Home"))
            .child(el("p").text(greeting))
            .into())
    }
}

pub struct PostList<'a> {
    pub posts: &'a PostsState,
}

impl Component for PostList<'_> {
    fn name(&self) -> &'static str {
        "PostList"
    }

    fn render(&self, cx: &RenderContext<'_>) -> Result<Node, RenderError> {
        let section = el("section").class("posts").child(el("h1").text("Posts"));

        if let Some(error) = &self.posts.error {
            return Ok(section.child(el("p").class("error").text(error.as_str())).into());
        }
        if self.posts.loading {
            return Ok(section.child(el("p").class("loading").text("Loading posts...")).into());
        }
        if self.posts.items.is_empty() {
            return Ok(section.child(el("p").text("No posts yet.")).into());
        }

        let cards = self
            .posts
            .items
            .iter()
            .map(|post| cx.render(&PostCard { post }))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(section.child(el("ul").class("collection").children(cards)).into())
    }
}

pub struct PostCard<'a> {
    pub post: &'a Post,
}

impl Component for PostCard<'_> {
    fn name(&self) -> &'static str {
        "PostCard"
    }

    fn validate(&self) -> Result<(), String> {
        if self.post.title.trim().is_empty() {
            return Err(format!("post {} has an empty title", self.post.id));
        }
        Ok(())
    }

    fn render(&self, _cx: &RenderContext<'_>) -> Result<Node, RenderError> {
        let mut item = el("li").class("collection-item").child(
            el("a")
                .attr("href", format!("/posts/{}", self.post.id))
                .text(self.post.title.as_str()),
        );
        if !self.post.author.is_empty() {
            item = item.child(el("span").class("author").text(format!(" by {}", self.post.author)));
        }
        Ok(item.into())
    }
}

pub struct PostDetail<'a> {
    pub id: u64,
    pub posts: &'a PostsState,
}

impl Component for PostDetail<'_> {
    fn name(&self) -> &'static str {
        "PostDetail"
    }

    fn render(&self, _cx: &RenderContext<'_>) -> Result<Node, RenderError> {
        let body = match self.posts.find(self.id) {
            Some(post) => el("article")
                .child(el("h2").text(post.title.as_str()))
                .child(el("p").text(post.body.as_str())),
            None if self.posts.loading => el("p").class("loading").text("Loading post..."),
            None => el("p").text(format!("Post {} is not loaded.", self.id)),
        };
        Ok(el("section")
            .class("post")
            .child(body)
            .child(el("a").attr("href", "/posts").text("Back to posts"))
            .into())
    }
}

pub struct AboutPage;

impl Component for AboutPage {
    fn name(&self) -> &'static str {
        "AboutPage"
    }

    fn render(&self, _cx: &RenderContext<'_>) -> Result<Node, RenderError> {
        Ok(el("section")
            .class("about")
            .child(el("h1").text("About"))
            .child(el("p").text("Rendered on the server, resumed in the browser."))
            .into())
    }
}

pub struct NotFoundPage<'a> {
    pub path: &'a str,
}

impl Component for NotFoundPage<'_> {
    fn name(&self) -> &'static str {
        "NotFoundPage"
    }

    fn render(&self, _cx: &RenderContext<'_>) -> Result<Node, RenderError> {
        Ok(el("section")
            .class("not-found")
            .child(el("h1").text("Page not found"))
            .child(el("p").text(format!("Nothing lives at {}.", self.path)))
            .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeProps;

    fn props_for(route: Route) -> TreeProps {
        let mut props = TreeProps::default();
        props.navigation.route = Some(route);
        props
    }

    fn post(id: u64, title: &str) -> Post {
        Post {
            id,
            title: title.into(),
            body: "text".into(),
            author: "ada".into(),
        }
    }

    fn render(props: &TreeProps, strict: bool) -> Result<String, RenderError> {
        RenderContext::new(props, strict)
            .render(&App)
            .map(|n| n.render_to_string())
    }

    #[test]
    fn test_home_marks_active_link() {
        let html = render(&props_for(Route::Home), true).unwrap();
        assert!(html.contains(r#"<li class="active"><a href="/">Home</a></li>"#));
        assert!(html.contains("Welcome."));
        assert!(html.contains("Guest"));
    }

    #[test]
    fn test_post_list_renders_cards() {
        let mut props = props_for(Route::Posts);
        props.posts.items = vec![post(1, "First"), post(2, "Second")];

        let html = render(&props, true).unwrap();
        assert!(html.contains(r#"<a href="/posts/1">First</a>"#));
        assert!(html.contains(r#"<a href="/posts/2">Second</a>"#));
    }

    #[test]
    fn test_post_detail_falls_back_when_missing() {
        let html = render(&props_for(Route::Post { id: 9 }), true).unwrap();
        assert!(html.contains("Post 9 is not loaded."));
    }

    #[test]
    fn test_strict_mode_rejects_invalid_props() {
        let mut props = props_for(Route::Posts);
        props.posts.items = vec![post(3, "  ")];

        let err = render(&props, true).unwrap_err();
        assert!(matches!(err, RenderError::InvalidProps { component: "PostCard", .. }));

        // Lenient mode renders anyway.
        assert!(render(&props, false).is_ok());
    }

    #[test]
    fn test_signed_in_user_badge() {
        let mut props = props_for(Route::About);
        props.current_user.user = Some(User { id: 1, name: "Grace".into(), email: None });

        let html = render(&props, true).unwrap();
        assert!(html.contains("Signed in as Grace"));
    }

    #[test]
    fn test_unparsed_tree_renders_shell_only() {
        let html = render(&TreeProps::default(), true).unwrap();
        assert!(html.starts_with(r#"<div class="app">"#));
        assert!(html.contains(r#"<div class="container"></div>"#));
    }
}
