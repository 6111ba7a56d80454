//! Checkout orchestrator
//!
//! [`Checkout`] owns the step machine and the form, borrows the cart and
//! the shopper through injected handles, and talks to the backend through
//! [`CheckoutApi`]. Every failure ends up as a [`Banner`]; nothing here
//! returns an error to the caller.
//!
//! ```text
//!  Shipping ──next──► Payment ──next──► Confirmation
//!      ▲                 │  │
//!      └──────back───────┘  └─next (redirect method)─► payment page
//!                                                        │
//!  handle_payment_return(approved) ◄─────────────────────┘
//! ```

use super::assembly::{build_draft, confirmed_order, resolve_payment_method_id};
use super::context::{CartHandle, UserSession};
use super::error::{
    CheckoutError, CheckoutFailure, CheckoutResult, PAID_BUT_NOT_CREATED, redirect_failure_message,
};
use super::form::CheckoutForm;
use super::loader::{CheckoutData, CheckoutDataLoader};
use super::navigator::{LogNavigator, Navigator};
use super::payment::{PaymentReturn, ReturnStatus, checkout_url, prepare_items, prepare_payer};
use super::payment_status::determine_payment_status;
use super::session::{
    MemoryPaymentSessionStore, PaymentSession, PaymentSessionState, PaymentSessionStore,
    SessionStoreError,
};
use super::step::CheckoutStep;
use super::totals::{Pricing, Totals};
use super::validation::{is_step1_valid, is_step2_valid};
use crate::config::Config;
use shared::models::{
    CartItem, ConfirmedOrder, OrderDraft, PaymentMethod, PaymentStatus, PreferenceRequest,
};
use std::sync::Arc;
use std::time::Duration;
use tienda_client::CheckoutApi;

pub const CHECKOUT_PATH: &str = "/checkout";
pub const REDIRECT_BANNER: &str = "Redirigiendo a Mercado Pago...";
pub const PENDING_BANNER: &str =
    "⏳ Tu pago está pendiente de aprobación. Te notificaremos cuando se confirme.";
pub const REJECTED_BANNER: &str = "❌ El pago fue rechazado. Por favor intenta nuevamente.";
pub const PAYMENT_NOT_RECORDED_BANNER: &str =
    "Tu pedido fue creado, pero no pudimos registrar el pago. Si ves un pedido duplicado, contacta a soporte.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Info,
    Warning,
    Error,
}

/// One-line message above the steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
        }
    }
}

/// Result of [`Checkout::next`] and the actions it delegates to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextOutcome {
    /// Shipping → Payment
    Advanced,
    /// Validation failed; errors are on the form
    Invalid,
    /// Order created, now on Confirmation
    Confirmed,
    /// Shopper sent to the payment page
    Redirected(String),
    /// Banner set
    Failed,
    /// Another action is in flight
    Busy,
    /// Nothing to do from the current step
    Ignored,
}

/// Result of [`Checkout::handle_payment_return`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnOutcome {
    /// Not a provider return, or nothing to resume
    Ignored,
    Confirmed,
    /// The approved payment already produced its order
    AlreadyProcessed,
    Pending,
    Rejected,
    /// Paid but the order could not be created
    Failed,
}

pub struct Checkout {
    api: Arc<dyn CheckoutApi>,
    loader: CheckoutDataLoader,
    cart: Arc<dyn CartHandle>,
    user: UserSession,
    store: Arc<dyn PaymentSessionStore>,
    navigator: Arc<dyn Navigator>,
    config: Config,
    pricing: Pricing,
    form: CheckoutForm,
    data: CheckoutData,
    step: CheckoutStep,
    loading: bool,
    processing: bool,
    banner: Option<Banner>,
    return_status: Option<ReturnStatus>,
}

impl Checkout {
    pub fn new(
        api: Arc<dyn CheckoutApi>,
        cart: Arc<dyn CartHandle>,
        user: UserSession,
        config: Config,
    ) -> Self {
        let pricing = Pricing {
            shipping_cost: config.shipping_cost,
            tax_rate: config.tax_rate,
        };
        Self {
            loader: CheckoutDataLoader::new(api.clone()),
            api,
            cart,
            user,
            store: Arc::new(MemoryPaymentSessionStore::new()),
            navigator: Arc::new(LogNavigator),
            config,
            pricing,
            form: CheckoutForm::new(),
            data: CheckoutData::default(),
            step: CheckoutStep::start(),
            loading: false,
            processing: false,
            banner: None,
            return_status: None,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn PaymentSessionStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn with_form(mut self, form: CheckoutForm) -> Self {
        self.form = form;
        self
    }

    /// Load reference data and prefill the form from the profile
    pub async fn initialize(&mut self) {
        self.loading = true;
        self.form.hydrate_from_user(&self.user);
        self.data = self.loader.load(&self.user).await;
        self.loading = false;
        tracing::info!(
            methods = self.data.payment_methods.len(),
            cards = self.data.saved_cards.len(),
            addresses = self.data.saved_addresses.len(),
            "Checkout data loaded"
        );
    }

    /// The shopper's identity arrived or changed
    pub async fn set_user(&mut self, user: UserSession) {
        let identity_changed = user.id != self.user.id;
        self.user = user;
        self.form.hydrate_from_user(&self.user);
        if identity_changed {
            self.loader.reload_saved(&self.user, &mut self.data).await;
        }
    }

    // ==================== State ====================

    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CheckoutForm {
        &mut self.form
    }

    pub fn data(&self) -> &CheckoutData {
        &self.data
    }

    pub fn step(&self) -> &CheckoutStep {
        &self.step
    }

    pub fn user(&self) -> &UserSession {
        &self.user
    }

    pub fn cart_items(&self) -> Vec<CartItem> {
        self.cart.items()
    }

    pub fn cart(&self) -> &Arc<dyn CartHandle> {
        &self.cart
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn clear_banner(&mut self) {
        self.banner = None;
    }

    /// Status the shopper came back from the payment page with
    pub fn return_status(&self) -> Option<ReturnStatus> {
        self.return_status
    }

    pub fn totals(&self) -> Totals {
        Totals::compute(
            &self.cart.items(),
            self.form.data().delivery_type,
            &self.pricing,
        )
    }

    /// Backend method behind the current selection
    pub fn selected_method(&self) -> Option<&PaymentMethod> {
        let choice = self.form.data().payment_method?;
        let id = resolve_payment_method_id(choice, &self.data.payment_methods)?;
        self.data.method(id)
    }

    /// Whether the Next action is enabled
    pub fn can_advance(&self) -> bool {
        if self.processing || self.loading {
            return false;
        }
        let data = self.form.data();
        match &self.step {
            CheckoutStep::Shipping(_) => is_step1_valid(data),
            CheckoutStep::Payment(_) => is_step2_valid(
                data.payment_method.as_ref(),
                &data.card_info,
                &self.data.payment_methods,
                data.selected_card_id,
                &self.form.context(),
            ),
            CheckoutStep::Confirmation(_) => false,
        }
    }

    // ==================== Navigation ====================

    pub async fn next(&mut self) -> NextOutcome {
        if self.processing {
            return NextOutcome::Busy;
        }
        if self.step.is_shipping() {
            if !self.form.validate_step1() {
                tracing::debug!(errors = self.form.errors().len(), "Shipping step invalid");
                return NextOutcome::Invalid;
            }
            self.processing = true;
            pause(self.config.step_delay).await;
            self.step = match std::mem::take(&mut self.step) {
                CheckoutStep::Shipping(shipping) => CheckoutStep::Payment(shipping.advance()),
                other => other,
            };
            self.processing = false;
            NextOutcome::Advanced
        } else if self.step.is_payment() {
            if !self.form.validate_step2(&self.data.payment_methods) {
                tracing::debug!(errors = self.form.errors().len(), "Payment step invalid");
                return NextOutcome::Invalid;
            }
            if self.selected_method().is_some_and(PaymentMethod::is_redirect) {
                self.start_external_payment().await
            } else {
                self.create_order().await
            }
        } else {
            NextOutcome::Ignored
        }
    }

    /// Payment → Shipping; no-op elsewhere
    pub fn back(&mut self) {
        self.step = match std::mem::take(&mut self.step) {
            CheckoutStep::Payment(payment) => CheckoutStep::Shipping(payment.back()),
            other => other,
        };
    }

    fn enter_confirmation(&mut self, order: ConfirmedOrder) {
        self.step = match std::mem::take(&mut self.step) {
            CheckoutStep::Payment(payment) => CheckoutStep::Confirmation(payment.confirm(order)),
            other => {
                tracing::warn!(step = other.number(), "Order confirmed outside the payment step");
                other
            }
        };
    }

    // ==================== Orders ====================

    async fn place_order(
        &self,
        draft: &OrderDraft,
        method: Option<&PaymentMethod>,
        cart: &[CartItem],
        totals: &Totals,
        returned: Option<PaymentStatus>,
    ) -> CheckoutResult<ConfirmedOrder> {
        let response = self.api.create_order(draft, self.user.token()).await?;
        let estado_pago = determine_payment_status(&response, method, returned);
        let order = confirmed_order(&response, draft, method, cart, totals, estado_pago);
        tracing::info!(order_id = ?order.id, estado_pago = ?estado_pago, total = %order.monto_total, "Order created");
        Ok(order)
    }

    /// Post the order for a non-redirect payment method
    pub async fn create_order(&mut self) -> NextOutcome {
        if self.processing {
            return NextOutcome::Busy;
        }
        if !self.step.is_payment() {
            return NextOutcome::Ignored;
        }
        self.processing = true;
        self.banner = None;

        let cart = self.cart.items();
        let totals = self.totals();
        let method = self.selected_method().cloned();
        let result = match build_draft(&self.user, self.form.data(), &self.data, &cart, &totals) {
            Ok(draft) => {
                self.place_order(&draft, method.as_ref(), &cart, &totals, None)
                    .await
            }
            Err(e) => Err(e),
        };
        self.processing = false;

        match result {
            Ok(order) => {
                self.cart.clear();
                self.enter_confirmation(order);
                NextOutcome::Confirmed
            }
            Err(e) => {
                let failure = CheckoutFailure::classify(&e);
                tracing::error!(error = %e, code = e.code().code(), failure = ?failure, "Order creation failed");
                self.banner = Some(Banner::error(failure.message()));
                NextOutcome::Failed
            }
        }
    }

    // ==================== External payment ====================

    async fn prepare_redirect(&self) -> CheckoutResult<String> {
        self.store.clear()?;

        let cart = self.cart.items();
        let totals = self.totals();
        let items = prepare_items(&cart, &self.config.currency_id)?;
        let draft = build_draft(&self.user, self.form.data(), &self.data, &cart, &totals)?;

        let request = PreferenceRequest {
            items,
            payer: prepare_payer(&self.user),
        };
        let response = self.api.create_payment_preference(&request).await?;
        let url = checkout_url(&response)?;

        let session = PaymentSession::new(
            draft,
            cart,
            self.selected_method().cloned(),
            totals,
            response.preference_id().map(str::to_string),
        )?;
        self.store.save(&session)?;
        tracing::info!(
            session = %session.id,
            preference_id = ?session.preference_id,
            "Payment session saved"
        );
        Ok(url)
    }

    /// Create the provider preference, persist the pending payment and leave
    pub async fn start_external_payment(&mut self) -> NextOutcome {
        if self.processing {
            return NextOutcome::Busy;
        }
        self.processing = true;
        self.banner = None;

        match self.prepare_redirect().await {
            Ok(url) => {
                self.banner = Some(Banner::info(REDIRECT_BANNER));
                pause(self.config.redirect_delay).await;
                self.navigator.redirect(&url);
                self.processing = false;
                NextOutcome::Redirected(url)
            }
            Err(e) => {
                tracing::error!(error = %e, code = e.code().code(), "Payment redirect failed");
                self.banner = Some(Banner::error(redirect_failure_message(&e)));
                self.processing = false;
                NextOutcome::Failed
            }
        }
    }

    /// Resume after the payment page sent the shopper back
    pub async fn handle_payment_return(&mut self, url: &str) -> ReturnOutcome {
        let Some(ret) = PaymentReturn::parse(url) else {
            return ReturnOutcome::Ignored;
        };
        let Some(status) = ret.outcome() else {
            tracing::warn!(status = %ret.status, "Unknown payment return status");
            return ReturnOutcome::Ignored;
        };
        tracing::info!(
            status = ?status,
            payment_id = ?ret.payment_id,
            preference_id = ?ret.preference_id,
            "Payment return"
        );
        self.return_status = Some(status);

        let outcome = match status {
            ReturnStatus::Approved => self.finish_paid_order(&ret).await,
            ReturnStatus::Pending => {
                self.banner = Some(Banner::warning(PENDING_BANNER));
                self.update_session(&ret, PaymentSessionState::ReturnedPending);
                ReturnOutcome::Pending
            }
            ReturnStatus::Failure => {
                self.banner = Some(Banner::error(REJECTED_BANNER));
                self.update_session(&ret, PaymentSessionState::ReturnedFailure);
                ReturnOutcome::Rejected
            }
        };

        if outcome != ReturnOutcome::AlreadyProcessed {
            pause(self.config.return_cleanup_delay).await;
        }
        self.navigator.replace_location(CHECKOUT_PATH);
        outcome
    }

    fn load_session(&self) -> Option<PaymentSession> {
        match self.store.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read payment session");
                None
            }
        }
    }

    fn persist(&self, session: &PaymentSession) -> Result<(), SessionStoreError> {
        self.store.save(session).inspect_err(|e| {
            tracing::error!(session = %session.id, error = %e, "Failed to save payment session");
        })
    }

    fn update_session(&self, ret: &PaymentReturn, state: PaymentSessionState) {
        if let Some(mut session) = self.load_session()
            && !session.is_finalized()
        {
            session.record_return(ret.payment_id.as_deref(), ret.preference_id.as_deref());
            session.mark(state);
            // Logged inside persist
            let _ = self.persist(&session);
        }
    }

    /// Pending record built from what is on screen (no record was saved)
    fn session_from_live_state(&self) -> CheckoutResult<PaymentSession> {
        let cart = self.cart.items();
        let totals = self.totals();
        let draft = build_draft(&self.user, self.form.data(), &self.data, &cart, &totals)?;
        PaymentSession::new(draft, cart, self.selected_method().cloned(), totals, None)
            .map_err(CheckoutError::from)
    }

    async fn finish_paid_order(&mut self, ret: &PaymentReturn) -> ReturnOutcome {
        let mut session = match self.load_session() {
            Some(session) if session.is_finalized() => {
                tracing::info!(
                    session = %session.id,
                    order_id = ?session.order_id,
                    "Approved payment already processed"
                );
                return ReturnOutcome::AlreadyProcessed;
            }
            Some(session) => session,
            None if self.cart.is_empty() => {
                tracing::info!("Approved return with no pending payment and an empty cart");
                return ReturnOutcome::Ignored;
            }
            None => match self.session_from_live_state() {
                Ok(session) => session,
                Err(e) => {
                    tracing::error!(error = %e, code = e.code().code(), "Cannot rebuild order after approved payment");
                    self.banner = Some(Banner::error(PAID_BUT_NOT_CREATED));
                    return ReturnOutcome::Failed;
                }
            },
        };

        if !session.draft_intact() {
            tracing::error!(session = %session.id, "Stored order draft does not match its hash");
            self.banner = Some(Banner::error(PAID_BUT_NOT_CREATED));
            return ReturnOutcome::Failed;
        }

        session.record_return(ret.payment_id.as_deref(), ret.preference_id.as_deref());
        session.mark(PaymentSessionState::ReturnedSuccess);
        if self.persist(&session).is_err() {
            // No order is posted without a saved ReturnedSuccess record
            self.banner = Some(Banner::error(PAID_BUT_NOT_CREATED));
            return ReturnOutcome::Failed;
        }

        self.step = CheckoutStep::resumed_payment();
        self.processing = true;
        let result = self
            .place_order(
                &session.draft,
                session.payment_method.as_ref(),
                &session.cart,
                &session.totals,
                Some(PaymentStatus::Approved),
            )
            .await;
        self.processing = false;

        match result {
            Ok(order) => {
                session.order_id = order.id;
                session.mark(PaymentSessionState::Finalized);
                if self.persist(&session).is_err() {
                    // A created order never leaves a replayable record behind
                    if let Err(e) = self.store.clear() {
                        tracing::error!(session = %session.id, error = %e, "Failed to clear payment session");
                    }
                    self.banner = Some(Banner::warning(PAYMENT_NOT_RECORDED_BANNER));
                }
                self.cart.clear();
                self.enter_confirmation(order);
                ReturnOutcome::Confirmed
            }
            Err(e) => {
                tracing::error!(
                    session = %session.id,
                    error = %e,
                    code = e.code().code(),
                    "Order creation after payment failed"
                );
                self.banner = Some(Banner::error(PAID_BUT_NOT_CREATED));
                ReturnOutcome::Failed
            }
        }
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
