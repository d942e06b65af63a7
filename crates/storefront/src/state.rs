//! Widget state and the UI event reducer.
//!
//! `AppState` replaces page-global singletons with one explicitly owned
//! value: the host creates it with [`AppState::init`], feeds it [`UiEvent`]s
//! through [`AppState::dispatch`], applies the returned [`Effect`]s (render a
//! region, show a toast, start a timer) and tears it down with
//! [`AppState::shutdown`]. Nothing in here touches markup or timers directly,
//! so the whole flow is testable without a browser.

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use funky_teens_core::ProductId;

use crate::catalog::{ProductCard, ProductExtractor};
use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::models::Notification;
use crate::render::Renderer;
use crate::services::auth::SessionManager;
use crate::services::cart::{CartManager, QuantityUpdate};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

const HOME_PATHS: &[&str] = &["home.html", "index.html"];

/// A part of the page the host re-renders on request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Login/logout control in every nav menu.
    NavAuth,
    /// The login popup overlay.
    LoginPopup,
    /// The cart overlay, including items and total.
    CartOverlay,
    /// Every cart count badge.
    CartCount,
}

impl Region {
    /// All regions, in render order.
    pub const ALL: [Self; 4] = [
        Self::NavAuth,
        Self::LoginPopup,
        Self::CartOverlay,
        Self::CartCount,
    ];
}

/// Something the host must do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Re-render a region from the current state.
    Render(Region),
    /// Show a toast.
    Notify(Notification),
    /// Fire [`UiEvent::LoginPopupTimerFired`] after the delay.
    ShowLoginPopupAfter(Duration),
    /// Toggle the body's `modal-open` class.
    SetBodyModalOpen(bool),
}

/// User and page events fed in by the host.
#[derive(Debug)]
pub enum UiEvent {
    /// Page finished loading at `path`.
    PageLoaded { path: String },
    /// Nav "Login" control.
    ShowLoginClicked,
    /// Login form submitted (button or Enter in the password field).
    LoginSubmitted {
        username: String,
        password: SecretString,
    },
    /// Popup close control.
    CloseLoginPopup,
    /// Click on the dimmed area around the popup.
    LoginOverlayClicked,
    /// Nav "Logout" control.
    LogoutClicked,
    /// Timer requested by [`Effect::ShowLoginPopupAfter`] elapsed.
    LoginPopupTimerFired,
    /// "Sign up here" link.
    SignupClicked,
    /// Cart icon in the header.
    CartIconClicked,
    /// Cart overlay close control.
    CloseCart,
    /// "Continue" button in the cart overlay.
    ContinueShopping,
    /// Click on the dimmed area around the cart.
    CartOverlayClicked,
    /// Escape key anywhere on the page.
    EscapePressed,
    /// Add-to-cart control inside `card`.
    AddToCart(ProductCard),
    /// Trash control on a cart line.
    RemoveItem(ProductId),
    /// "+" control on a cart line.
    IncreaseQuantity(ProductId),
    /// "−" control on a cart line.
    DecreaseQuantity(ProductId),
    /// "Checkout" button.
    CheckoutClicked,
}

/// State of both widgets on one page.
#[derive(Debug)]
pub struct AppState {
    config: StorefrontConfig,
    sessions: SessionManager,
    cart: CartManager,
    login_popup_open: bool,
    cart_open: bool,
}

impl AppState {
    /// Load both widgets from `store`.
    pub fn init(config: StorefrontConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let sessions = SessionManager::load(Arc::clone(&store), config.session_key.clone());
        let cart = CartManager::load(
            store,
            config.cart_key.clone(),
            ProductExtractor::new(config.placeholder_image.clone()),
        );

        tracing::info!(
            logged_in = sessions.is_logged_in(),
            cart_lines = cart.items().len(),
            "Storefront widgets initialized"
        );

        Self {
            config,
            sessions,
            cart,
            login_popup_open: false,
            cart_open: false,
        }
    }

    /// Open the store named by `config` and load both widgets from it.
    ///
    /// Uses a [`FileStore`] when `storage_dir` is set, otherwise a
    /// [`MemoryStore`].
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the storage directory cannot be created.
    pub fn open(config: StorefrontConfig) -> Result<Self, AppError> {
        let store: Arc<dyn KeyValueStore> = match &config.storage_dir {
            Some(dir) => Arc::new(FileStore::open(dir)?),
            None => Arc::new(MemoryStore::new()),
        };
        Ok(Self::init(config, store))
    }

    /// Detach change listeners and close overlays.
    ///
    /// Persisted state is already current; nothing is flushed here.
    pub fn shutdown(mut self) {
        self.cart.clear_listeners();
        self.login_popup_open = false;
        self.cart_open = false;
        tracing::info!("Storefront widgets shut down");
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    #[must_use]
    pub const fn cart(&self) -> &CartManager {
        &self.cart
    }

    /// Mutable cart access, e.g. to register change listeners.
    pub const fn cart_mut(&mut self) -> &mut CartManager {
        &mut self.cart
    }

    #[must_use]
    pub const fn is_login_popup_open(&self) -> bool {
        self.login_popup_open
    }

    #[must_use]
    pub const fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    /// Renderer configured for this page.
    #[must_use]
    pub const fn renderer(&self) -> Renderer {
        Renderer::new(self.config.currency, self.config.notification_timeout)
    }

    /// Apply `event` and return what the host must do next.
    pub fn dispatch(&mut self, event: UiEvent) -> Vec<Effect> {
        tracing::trace!(?event, "Dispatching UI event");

        match event {
            UiEvent::PageLoaded { path } => self.page_loaded(&path),
            UiEvent::ShowLoginClicked => self.set_login_popup(true),
            UiEvent::LoginSubmitted { username, password } => self.login(&username, &password),
            UiEvent::CloseLoginPopup | UiEvent::LoginOverlayClicked => {
                self.set_login_popup(false)
            }
            UiEvent::LogoutClicked => self.logout(),
            UiEvent::LoginPopupTimerFired => {
                if self.sessions.is_logged_in() {
                    Vec::new()
                } else {
                    self.set_login_popup(true)
                }
            }
            UiEvent::SignupClicked => vec![Effect::Notify(Notification::info(
                "Signup functionality will be connected to database!",
            ))],
            UiEvent::CartIconClicked => self.set_cart(true),
            UiEvent::CloseCart | UiEvent::ContinueShopping | UiEvent::CartOverlayClicked => {
                self.set_cart(false)
            }
            UiEvent::EscapePressed => {
                if self.cart_open {
                    self.set_cart(false)
                } else {
                    Vec::new()
                }
            }
            UiEvent::AddToCart(card) => self.add_to_cart(&card),
            UiEvent::RemoveItem(id) => self.cart_change(|cart| {
                cart.remove_item(&id)
                    .map(|_| Notification::success("Item removed from cart"))
            }),
            UiEvent::IncreaseQuantity(id) => self.cart_change(|cart| {
                cart.increment(&id);
                None
            }),
            UiEvent::DecreaseQuantity(id) => self.cart_change(|cart| match cart.decrement(&id) {
                QuantityUpdate::Removed => Some(Notification::success("Item removed from cart")),
                QuantityUpdate::Updated(_) | QuantityUpdate::NotFound => None,
            }),
            UiEvent::CheckoutClicked => self.checkout(),
        }
    }

    fn page_loaded(&self, path: &str) -> Vec<Effect> {
        let mut effects: Vec<Effect> = Region::ALL.into_iter().map(Effect::Render).collect();
        if is_home_page(path) && !self.sessions.is_logged_in() {
            effects.push(Effect::ShowLoginPopupAfter(self.config.login_popup_delay));
        }
        effects
    }

    fn login(&mut self, username: &str, password: &SecretString) -> Vec<Effect> {
        match self.sessions.login(username, password) {
            Ok(user) => {
                let welcome = Notification::success(format!("Welcome {}! 🎉", user.username));
                let mut effects = vec![Effect::Render(Region::NavAuth)];
                effects.extend(self.set_login_popup(false));
                effects.push(Effect::Notify(welcome));
                effects
            }
            Err(e) => AppError::from(e)
                .notice()
                .map(Effect::Notify)
                .into_iter()
                .collect(),
        }
    }

    fn logout(&mut self) -> Vec<Effect> {
        self.sessions.logout();
        vec![
            Effect::Render(Region::NavAuth),
            Effect::Notify(Notification::info("Logged out successfully! 👋")),
            Effect::ShowLoginPopupAfter(self.config.login_popup_delay),
        ]
    }

    fn add_to_cart(&mut self, card: &ProductCard) -> Vec<Effect> {
        match self.cart.add_item(card) {
            Ok(line) => {
                let mut effects = cart_renders();
                effects.push(Effect::Notify(Notification::success(format!(
                    "{} added to cart! 🎉",
                    line.name
                ))));
                effects
            }
            Err(e) => AppError::from(e)
                .notice()
                .map(Effect::Notify)
                .into_iter()
                .collect(),
        }
    }

    /// Run a cart mutation; re-render if the cart changed.
    fn cart_change(
        &mut self,
        change: impl FnOnce(&mut CartManager) -> Option<Notification>,
    ) -> Vec<Effect> {
        let before = self.cart.revision();
        let notice = change(&mut self.cart);

        let mut effects = if self.cart.revision() == before {
            Vec::new()
        } else {
            cart_renders()
        };
        effects.extend(notice.map(Effect::Notify));
        effects
    }

    fn checkout(&self) -> Vec<Effect> {
        let notice = if self.cart.is_empty() {
            Notification::error("Your cart is empty!")
        } else {
            Notification::info("Checkout functionality will be implemented!")
        };
        vec![Effect::Notify(notice)]
    }

    fn set_login_popup(&mut self, open: bool) -> Vec<Effect> {
        if self.login_popup_open == open {
            return Vec::new();
        }
        self.login_popup_open = open;
        vec![Effect::Render(Region::LoginPopup), self.modal_effect()]
    }

    fn set_cart(&mut self, open: bool) -> Vec<Effect> {
        if self.cart_open == open {
            return Vec::new();
        }
        self.cart_open = open;
        vec![Effect::Render(Region::CartOverlay), self.modal_effect()]
    }

    const fn modal_effect(&self) -> Effect {
        Effect::SetBodyModalOpen(self.login_popup_open || self.cart_open)
    }
}

fn cart_renders() -> Vec<Effect> {
    vec![
        Effect::Render(Region::CartOverlay),
        Effect::Render(Region::CartCount),
    ]
}

/// Whether `path` is the storefront landing page.
fn is_home_page(path: &str) -> bool {
    path == "/" || HOME_PATHS.iter().any(|page| path.contains(page))
}
