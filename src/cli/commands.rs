//! Command execution for the `altar` binary.

use std::fs;
use std::path::Path;

use altar_core::{
    AccessResolver, IdentityContext, ImageResolver, PageView, RenderMode, Renderer, ShareLookup,
    WallDescription,
};
use anyhow::{bail, Context, Result};

use super::output::Output;
use super::{Commands, SessionCommands};
use crate::api::AltarBackend;
use crate::page::load_page;
use crate::utils::identity::IdentityStore;
use crate::utils::toml_config::AltarConfig;

/// Everything a command needs, built once in `main`.
pub struct Runner {
    config: AltarConfig,
    backend: Box<dyn AltarBackend>,
    store: IdentityStore,
    output: Output,
}

impl Runner {
    pub fn new(
        config: AltarConfig,
        backend: Box<dyn AltarBackend>,
        store: IdentityStore,
        output: Output,
    ) -> Self {
        Self {
            config,
            backend,
            store,
            output,
        }
    }

    fn resolver(&self) -> AccessResolver {
        AccessResolver::new(self.config.access.email_match)
    }

    pub async fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Login { email, password } => self.login(&email, password).await,
            Commands::Register {
                email,
                name,
                password,
            } => self.register(&email, &name, password).await,
            Commands::Verify { email, code } => self.verify(&email, &code).await,
            Commands::Logout => self.logout(),
            Commands::Whoami => {
                self.whoami();
                Ok(())
            }
            Commands::Session(SessionCommands::Show { id }) => self.show_session(&id).await,
            Commands::Render {
                session_id,
                file,
                out,
                title,
                image_origin,
            } => {
                let origin = image_origin.unwrap_or_else(|| self.config.api.base_url.clone());
                let (wall, default_title) = match (session_id, file) {
                    (_, Some(path)) => (read_wall(&path)?, title_from_path(&path)),
                    (Some(id), None) => self.fetch_wall(&id).await?,
                    (None, None) => bail!("Nothing to render: pass a session id or --file"),
                };
                let title = title.unwrap_or(default_title);
                let html = render_html(&wall, &title, &origin);
                match out {
                    Some(path) => {
                        fs::write(&path, html)
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        self.output.wrote(&path);
                    }
                    None => print!("{}", html),
                }
                Ok(())
            }
            Commands::Config { full } => {
                self.show_config(full);
                Ok(())
            }
        }
    }

    fn password(&self, given: Option<String>) -> Result<String> {
        match given.or_else(|| self.output.prompt("Password")) {
            Some(password) => Ok(password),
            None => bail!("A password is required"),
        }
    }

    fn remember(&self, token: String, email: Option<String>, fallback_email: &str) -> Result<()> {
        let email = email
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| fallback_email.to_string());
        self.store
            .save(&IdentityContext::new(token, email.clone()))
            .context("Failed to store identity")?;
        self.output.success(&format!("Signed in as {}", email));
        Ok(())
    }

    async fn login(&self, email: &str, password: Option<String>) -> Result<()> {
        let password = self.password(password)?;
        let resp = self
            .backend
            .login(email, &password)
            .await
            .context("Login failed")?;
        tracing::info!("Logged in as {}", email);
        self.remember(resp.token, resp.email, email)
    }

    async fn register(&self, email: &str, name: &str, password: Option<String>) -> Result<()> {
        let password = self.password(password)?;
        let resp = self
            .backend
            .register(email, &password, name)
            .await
            .context("Registration failed")?;

        match resp.token {
            Some(token) => self.remember(token, None, email),
            None => {
                self.output.success(
                    resp.message
                        .as_deref()
                        .unwrap_or("Account created. Check your email for a verification code."),
                );
                self.output.next_step(
                    "Finish signing up with:",
                    &format!("altar verify {} <code>", email),
                );
                Ok(())
            }
        }
    }

    async fn verify(&self, email: &str, code: &str) -> Result<()> {
        let resp = self
            .backend
            .verify(email, code)
            .await
            .context("Verification failed")?;
        self.remember(resp.token, resp.email, email)
    }

    fn logout(&self) -> Result<()> {
        if self.store.clear().context("Failed to remove identity")? {
            self.output.success("Signed out");
        } else {
            self.output.info("Not signed in");
        }
        Ok(())
    }

    fn whoami(&self) {
        let identity = self.store.load();
        match identity.email() {
            Some(email) if identity.is_authenticated() => {
                self.output.field("email", email);
                self.output
                    .field("stored in", &self.store.path().display().to_string());
            }
            _ => {
                self.output.info("Not signed in");
                self.output.next_step("Sign in with:", "altar login <email>");
            }
        }
    }

    async fn load(&self, session_id: &str) -> PageView {
        let identity = self.store.load();
        load_page(self.backend.as_ref(), session_id, &identity, &self.resolver()).await
    }

    async fn show_session(&self, id: &str) -> Result<()> {
        let view = self.load(id).await;
        for error in &view.errors {
            self.output.error(error.user_message());
        }
        let Some(session) = &view.session else {
            bail!("Failed to load session {}", id);
        };

        let wall = session.wall();
        let tree = Renderer::default().render(wall, RenderMode::from_editable(view.editable()));

        self.output.heading(session.display_name());
        self.output.field("id", session.id.as_deref().unwrap_or(id));
        self.output
            .field("owner", session.owner_identity().unwrap_or("unknown"));
        self.output.field("sharing", &describe_share(&view.share));
        if let Some(info) = view.share.share_info() {
            self.output.editors(&info.editors);
        }
        self.output.access(&view.decision);
        self.output.field(
            "wall",
            &format!("{} x {}", tree.container.width, tree.container.height),
        );
        self.output.blocks(&tree.blocks);
        Ok(())
    }

    async fn fetch_wall(&self, id: &str) -> Result<(WallDescription, String)> {
        let view = self.load(id).await;
        for error in &view.errors {
            self.output.warning(error.user_message());
        }
        match view.session {
            Some(session) => {
                let title = session.display_name().to_string();
                Ok((session.wall().clone(), title))
            }
            None => bail!("Failed to load session {}", id),
        }
    }

    fn show_config(&self, full: bool) {
        let config = &self.config;
        self.output.heading("Configuration");
        self.output.field("api", &config.api.base_url);
        self.output.field(
            "token file",
            &config.identity.token_path().display().to_string(),
        );
        self.output
            .field("emails", &format!("{:?}", self.resolver().email_match()));
        self.output.field("log level", &config.logging.level);
        if full {
            self.output.raw(&config.to_toml());
        }
    }
}

/// Render a wall into a standalone read-only HTML document.
pub fn render_html(wall: &WallDescription, title: &str, image_origin: &str) -> String {
    Renderer::new(ImageResolver::with_origin(image_origin))
        .render(wall, RenderMode::ReadOnly)
        .to_html(title)
}

fn read_wall(path: &Path) -> Result<WallDescription> {
    let json =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    WallDescription::from_json(&json)
        .with_context(|| format!("{} is not a wall description", path.display()))
}

fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Altar".to_string())
}

fn describe_share(share: &ShareLookup) -> String {
    match share {
        ShareLookup::Found(info) => match info.share_type {
            Some(kind) => kind.to_string(),
            None => "not shared".to_string(),
        },
        ShareLookup::Denied => "permission denied".to_string(),
        ShareLookup::Unavailable(_) => "unavailable".to_string(),
    }
}
