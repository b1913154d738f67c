//! The simulation page: module bootstrap, slider wiring and rendering.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dgsim_core::config::DemoConfig;
use dgsim_core::error::SimError;
use dgsim_core::params::SimulationParameters;
use dgsim_core::pipeline::{self, Frame};
use dgsim_core::plot::{PlotConfig, PlotLayout, ThemeColors};
use dgsim_core::session::{ReferenceSpec, Session};
use dgsim_core::status::StatusMessage;
use js_sys::Promise;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};

use crate::backend::{describe, JsEnergyBackend};
use crate::clock::PerformanceClock;
use crate::dom;
use crate::plotly;

struct App {
    config: DemoConfig,
    session: RefCell<Session<JsEnergyBackend>>,
    clock: PerformanceClock,
    layout: PlotLayout,
    plot_config: PlotConfig,
    /// Set by the first `initialize`; the module is acquired at most once.
    load_started: Cell<bool>,
}

impl App {
    fn show(&self, message: &StatusMessage) {
        dom::set_text(&self.config.status_id, &message.text);
        dom::set_class(&self.config.status_id, message.status.class_name());
    }

    fn read_parameters(&self) -> Result<SimulationParameters, SimError> {
        let raw = dom::input(&self.config.slider_id)
            .map(|input| input.value())
            .unwrap_or_else(|_| self.config.default_delta_t.to_string());
        SimulationParameters::from_slider(self.config.system_kind, &raw, self.config.t_final)
    }

    /// Handles one slider input: mirrors the value, then recomputes after the settle delay.
    /// Leaves the page untouched until the module is ready.
    fn request_run(self: &Rc<Self>) {
        if !self.session.borrow().is_ready() {
            web_sys::console::warn_1(&"simulation module not ready; ignoring input".into());
            return;
        }

        let params = match self.read_parameters() {
            Ok(params) => params,
            Err(err) => {
                self.show(&StatusMessage::failed(&err));
                return;
            }
        };
        dom::set_text(&self.config.readout_id, &format_readout(params.delta_t));

        let generation = self.session.borrow_mut().begin_run();
        self.show(&StatusMessage::computing());

        let app = Rc::clone(self);
        let callback = Closure::once(move || app.run(params, generation));
        if let Err(err) = dom::set_timeout(&callback, self.config.settle_delay_ms) {
            self.show(&StatusMessage::failed(&SimError::Computation(describe(&err))));
            return;
        }
        callback.forget();
    }

    fn run(&self, params: SimulationParameters, generation: u64) {
        let result = {
            let mut session = self.session.borrow_mut();
            pipeline::run(&mut *session, &self.clock, &params, generation)
        };
        if let Ok(Frame {
            reference_ms: Some(ms),
            ..
        }) = &result
        {
            web_sys::console::log_1(&format!("reference solution computed in {ms:.1}ms").into());
        }
        // A newer run owns the plot and the status.
        if !self.session.borrow().is_current(generation) {
            web_sys::console::log_1(&format!("dropping stale run {generation}").into());
            return;
        }
        match result {
            Ok(frame) => self.render(frame),
            Err(err) => {
                web_sys::console::error_1(&err.to_string().into());
                self.show(&StatusMessage::failed(&err));
            }
        }
    }

    fn render(&self, frame: Frame) {

        if let Err(err) = plotly::draw(
            &self.config.plot_id,
            &frame.traces,
            &self.layout,
            &self.plot_config,
        ) {
            let err = SimError::Computation(describe(&err));
            web_sys::console::error_1(&err.to_string().into());
            self.show(&StatusMessage::failed(&err));
            return;
        }

        let timings = frame.timings;
        web_sys::console::log_1(
            &format!(
                "implicit midpoint and discrete gradient solutions computed in {:.1}ms and {:.1}ms ({:.1}ms total)",
                timings.implicit_midpoint_ms, timings.discrete_gradient_ms, timings.total_ms
            )
            .into(),
        );
        self.show(&StatusMessage::finished(&timings));
    }
}

/// Slider readout text.
pub(crate) fn format_readout(delta_t: f64) -> String {
    format!("{delta_t:.2}")
}

/// The simulation half of the page.
#[wasm_bindgen]
pub struct WasmSimulation {
    app: Rc<App>,
}

#[wasm_bindgen]
impl WasmSimulation {
    /// Reads the theme colors and wires the slider. `config` may be `undefined`
    /// or a partial `DemoConfig`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmSimulation, JsValue> {
        console_error_panic_hook::set_once();

        let config: DemoConfig = if config.is_undefined() || config.is_null() {
            DemoConfig::default()
        } else {
            from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid simulation config: {}", e)))?
        };
        config
            .validate()
            .map_err(|e| JsValue::from_str(&format!("Invalid simulation config: {}", e)))?;

        let colors = ThemeColors::from_css(&dom::root_property(&config.text_color_property)?);

        let app = Rc::new(App {
            session: RefCell::new(Session::new(ReferenceSpec::from(&config))),
            clock: PerformanceClock::new(),
            layout: PlotLayout::themed(&colors),
            plot_config: PlotConfig::default(),
            load_started: Cell::new(false),
            config,
        });

        let on_input = Rc::clone(&app);
        let input_cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            on_input.request_run();
        }) as Box<dyn FnMut(web_sys::Event)>);
        dom::input(&app.config.slider_id)?
            .add_event_listener_with_callback("input", input_cb.as_ref().unchecked_ref())?;
        input_cb.forget();

        Ok(WasmSimulation { app })
    }

    /// Awaits `loader`, which must resolve to the initialised computation module,
    /// then draws the first frame. Rejects with the load error; the session stays
    /// unready for the rest of the page's life in that case. Only the first call
    /// loads; later calls reject without touching the page.
    pub fn initialize(&self, loader: Promise) -> Promise {
        if self.app.load_started.replace(true) {
            return Promise::reject(&JsValue::from_str(&SimError::AlreadyLoaded.to_string()));
        }
        let app = Rc::clone(&self.app);
        future_to_promise(async move {
            app.show(&StatusMessage::loading_module());

            let loaded = match JsFuture::from(loader).await {
                Ok(module) => JsEnergyBackend::from_module(&module),
                Err(err) => Err(describe(&err)),
            };
            let outcome = app.session.borrow_mut().complete_load(loaded);

            match outcome {
                Ok(()) => {
                    web_sys::console::log_1(&"WebAssembly module loaded successfully".into());
                    app.show(&StatusMessage::loaded());
                    app.request_run();
                    Ok(JsValue::TRUE)
                }
                Err(err) => {
                    web_sys::console::error_1(&format!("Failed to load module: {err}").into());
                    app.show(&StatusMessage::failed(&err));
                    Err(JsValue::from_str(&err.to_string()))
                }
            }
        })
    }

    pub fn is_ready(&self) -> bool {
        self.app.session.borrow().is_ready()
    }

    /// Recomputes with the current slider value, as an input event would.
    pub fn recompute(&self) {
        self.app.request_run();
    }

    /// The cached reference trace, or `undefined` before it has been computed.
    pub fn reference(&self) -> Result<JsValue, JsValue> {
        match self.app.session.borrow().reference() {
            Some(trace) => to_value(trace)
                .map_err(|e| JsValue::from_str(&format!("Failed to serialize reference: {}", e))),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    pub fn generation(&self) -> u64 {
        self.app.session.borrow().generation()
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod page_tests {
    use super::*;
    use crate::test_support::{flat_module, install_plotly, module_with, mount, plot_count, settle};
    use dgsim_core::params::{SystemKind, T_FINAL};
    use web_sys::HtmlInputElement;
    use wasm_bindgen_test::wasm_bindgen_test;

    fn page(prefix: &str) -> DemoConfig {
        let config = DemoConfig {
            settle_delay_ms: 0,
            status_id: format!("{prefix}-status"),
            slider_id: format!("{prefix}-slider"),
            readout_id: format!("{prefix}-readout"),
            plot_id: format!("{prefix}-plot"),
            ..DemoConfig::default()
        };
        mount("div", &config.status_id);
        let slider: HtmlInputElement = mount("input", &config.slider_id)
            .dyn_into()
            .expect("input element");
        slider.set_value("0.25");
        mount("span", &config.readout_id).set_text_content(Some("--"));
        mount("div", &config.plot_id);
        install_plotly();
        config
    }

    fn simulation(config: &DemoConfig) -> WasmSimulation {
        WasmSimulation::new(to_value(config).expect("config")).expect("simulation")
    }

    fn load(sim: &WasmSimulation, module: JsValue) {
        sim.app
            .session
            .borrow_mut()
            .complete_load(JsEnergyBackend::from_module(&module))
            .expect("load");
    }

    fn status(config: &DemoConfig) -> (String, String) {
        let el = dom::element(&config.status_id).expect("status element");
        (el.text_content().unwrap_or_default(), el.class_name())
    }

    fn text(id: &str) -> String {
        dom::element(id)
            .expect("element")
            .text_content()
            .unwrap_or_default()
    }

    fn params(delta_t: f64) -> SimulationParameters {
        SimulationParameters::new(SystemKind::Toda, delta_t, T_FINAL).expect("params")
    }

    #[wasm_bindgen_test]
    fn rejects_degenerate_config() {
        let config = DemoConfig {
            reference_step: 0.0,
            ..DemoConfig::default()
        };
        let message = WasmSimulation::new(to_value(&config).expect("config"))
            .err()
            .and_then(|err| err.as_string())
            .unwrap_or_default();
        assert!(message.starts_with("Invalid simulation config"));
        assert!(message.contains("invalid time step 0"));
    }

    #[wasm_bindgen_test]
    fn input_before_ready_leaves_page_untouched() {
        let config = page("not-ready");
        let sim = simulation(&config);

        sim.recompute();

        assert_eq!(text(&config.readout_id), "--");
        assert_eq!(status(&config), (String::new(), String::new()));
        assert_eq!(sim.generation(), 0);
    }

    #[wasm_bindgen_test]
    fn stale_run_is_not_drawn() {
        let config = page("stale-ok");
        let sim = simulation(&config);
        load(&sim, flat_module());

        let older = sim.app.session.borrow_mut().begin_run();
        let newer = sim.app.session.borrow_mut().begin_run();

        sim.app.run(params(0.25), older);
        assert_eq!(plot_count(&config.plot_id), 0);
        assert_eq!(status(&config).0, "");

        sim.app.run(params(0.5), newer);
        assert_eq!(plot_count(&config.plot_id), 1);
        let (text, class) = status(&config);
        assert!(text.starts_with("implicit midpoint: "));
        assert_eq!(class, "ready");
    }

    #[wasm_bindgen_test]
    fn stale_failure_leaves_status_alone() {
        let config = page("stale-err");
        let sim = simulation(&config);
        load(&sim, module_with("throw new Error('diverged');"));

        let older = sim.app.session.borrow_mut().begin_run();
        let newer = sim.app.session.borrow_mut().begin_run();

        sim.app.run(params(0.25), older);
        assert_eq!(status(&config).0, "");

        sim.app.run(params(0.25), newer);
        let (text, class) = status(&config);
        assert_eq!(text, "Error: computation failed: diverged");
        assert_eq!(class, "error");
        assert_eq!(plot_count(&config.plot_id), 0);
    }

    #[wasm_bindgen_test]
    async fn failed_load_shows_reason_and_ignores_input() {
        let config = page("load-err");
        let sim = simulation(&config);

        let result = JsFuture::from(sim.initialize(Promise::reject(&JsValue::from_str("404"))))
            .await;
        assert!(result.is_err());
        assert!(!sim.is_ready());
        let failed = (
            "error loading module: 404".to_string(),
            "error".to_string(),
        );
        assert_eq!(status(&config), failed);

        sim.recompute();
        settle(5).await;
        assert_eq!(status(&config), failed);
        assert!(sim.reference().expect("reference").is_undefined());
        assert_eq!(plot_count(&config.plot_id), 0);
    }

    #[wasm_bindgen_test]
    async fn load_then_first_frame() {
        let config = page("load-ok");
        let sim = simulation(&config);

        JsFuture::from(sim.initialize(Promise::resolve(&flat_module())))
            .await
            .expect("initialize");
        assert!(sim.is_ready());
        assert_eq!(
            status(&config),
            ("computing...".to_string(), "loading".to_string())
        );
        assert_eq!(text(&config.readout_id), "0.25");

        settle(20).await;
        let (text, class) = status(&config);
        assert!(text.starts_with("implicit midpoint: "));
        assert_eq!(class, "ready");
        assert_eq!(plot_count(&config.plot_id), 1);
        assert!(!sim.reference().expect("reference").is_undefined());
    }

    #[wasm_bindgen_test]
    async fn second_initialize_is_refused() {
        let config = page("load-twice");
        let sim = simulation(&config);

        JsFuture::from(sim.initialize(Promise::resolve(&flat_module())))
            .await
            .expect("initialize");
        settle(20).await;
        let before = status(&config);

        let again = JsFuture::from(sim.initialize(Promise::resolve(&flat_module()))).await;
        let message = again.err().and_then(|err| err.as_string()).unwrap_or_default();
        assert_eq!(message, "simulation module already loaded");
        assert!(sim.is_ready());
        assert_eq!(status(&config), before);
    }
}
