//! Post-login dispatch and the deferred purchase-request flow
//!
//! Two halves of one workflow. Before authentication,
//! [`request_intent`] validates a purchase request and parks it in the
//! pending slot on its way to the login page. After authentication,
//! [`after_login`] consumes the slot, replays the request, and decides
//! where the user lands next. Every branch ends in a navigation; none of
//! them is the login page.

use tracing::warn;
use url::form_urlencoded;

use crate::auth::{Auth, User};
use crate::config::Pages;
use crate::error::Error;
use crate::pending::PendingStore;
use crate::products::{parse_quantity, ProductsClient};
use crate::requests::RequestsClient;

/// A navigation target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// The product catalog
    Catalog,

    /// The login page
    Login,

    /// The buyer's own requests list
    MyRequests,

    /// The seller dashboard
    SellerDashboard,

    /// The messaging page
    Messages,

    /// The profile-completion form, carrying where to go once done
    CompleteProfile {
        /// Target to continue to after the profile is completed
        next: Box<Page>,
    },
}

impl Page {
    /// Render the target as a relative URL using the configured page map.
    ///
    /// The continuation of a profile-completion target travels as a `next`
    /// query parameter, form-urlencoded.
    pub fn href(&self, pages: &Pages) -> String {
        match self {
            Page::Catalog => pages.catalog.clone(),
            Page::Login => pages.login.clone(),
            Page::MyRequests => pages.my_requests.clone(),
            Page::SellerDashboard => pages.seller_dashboard.clone(),
            Page::Messages => pages.messages.clone(),
            Page::CompleteProfile { next } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("next", &next.href(pages))
                    .finish();
                format!("{}?{}", pages.complete_profile, query)
            }
        }
    }
}

/// A user-visible toast to render alongside a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// The message text
    pub text: String,

    /// Whether to style the toast as an error
    pub is_error: bool,
}

impl Notice {
    /// Create a success notice
    pub fn success<T: Into<String>>(text: T) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// Create an error notice
    pub fn error<T: Into<String>>(text: T) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Where to go and what to show once a login has succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostLoginOutcome {
    /// Toast to render before navigating, if any
    pub notice: Option<Notice>,

    /// The page to navigate to
    pub destination: Page,
}

/// Outcome of a purchase-intent submission
#[derive(Debug, Clone, PartialEq)]
pub enum IntentOutcome {
    /// The request was parked in the pending slot; continue to login
    Deferred {
        /// The login page
        destination: Page,
    },

    /// Refused outright: sellers cannot request orders
    Refused {
        /// Toast explaining the refusal
        notice: Notice,
    },

    /// The submitted quantity failed validation; nothing was stored
    Invalid {
        /// Why the quantity was rejected
        reason: String,
    },
}

/// Decide the next navigation target after a successful authentication.
///
/// Runs exactly once per login, after the fresh user has been cached. A
/// well-formed pending action is consumed first: read once and cleared
/// whether or not its replay succeeds, so a failed replay is lost rather
/// than retried. The login itself is never rolled back; a replay failure
/// routes to the catalog with an error notice, not back to login.
pub async fn after_login(
    user: &User,
    pending: &PendingStore,
    requests: &RequestsClient,
) -> PostLoginOutcome {
    if let Some(action) = pending.take() {
        return match requests.add(&action.product_id, &action.quantity).await {
            Ok(ack) => PostLoginOutcome {
                notice: Some(Notice::success(ack.message)),
                destination: if user.needs_completion() {
                    Page::CompleteProfile {
                        next: Box::new(next_after_completion(user)),
                    }
                } else {
                    Page::MyRequests
                },
            },
            Err(err) => {
                warn!(%err, product_id = %action.product_id, "pending request replay failed");
                PostLoginOutcome {
                    notice: Some(Notice::error(format!(
                        "Could not submit your saved request: {}",
                        err.user_message()
                    ))),
                    destination: Page::Catalog,
                }
            }
        };
    }

    PostLoginOutcome {
        notice: None,
        destination: if user.needs_completion() {
            Page::CompleteProfile {
                next: Box::new(next_after_completion(user)),
            }
        } else {
            next_after_completion(user)
        },
    }
}

/// Where a freshly authenticated user belongs once their profile is
/// complete: the dashboard for sellers, the requests list for buyers.
fn next_after_completion(user: &User) -> Page {
    if user.is_seller {
        Page::SellerDashboard
    } else {
        Page::MyRequests
    }
}

/// Validate a purchase request and park it for replay after login.
///
/// Sellers are refused outright. The requested quantity must read as a
/// positive number no greater than the product's available quantity under
/// the lenient numeric parse. Only a request that passes both checks
/// touches the pending slot, overwriting whatever was there.
pub async fn request_intent(
    auth: &Auth,
    products: &ProductsClient,
    pending: &PendingStore,
    product_id: &str,
    quantity: &str,
) -> Result<IntentOutcome, Error> {
    let session = auth.check_session().await;
    if session.is_seller() {
        return Ok(IntentOutcome::Refused {
            notice: Notice::error("Sellers cannot request orders."),
        });
    }

    let product = products.get(product_id).await?;

    let requested = parse_quantity(quantity);
    if requested <= 0.0 {
        return Ok(IntentOutcome::Invalid {
            reason: "Please enter a valid quantity greater than zero.".to_string(),
        });
    }

    let available = parse_quantity(&product.quantity);
    if requested > available {
        return Ok(IntentOutcome::Invalid {
            reason: format!(
                "The requested quantity ({}) exceeds the available quantity ({}).",
                quantity, product.quantity
            ),
        });
    }

    pending.set(product_id, quantity);

    Ok(IntentOutcome::Deferred {
        destination: Page::Login,
    })
}
