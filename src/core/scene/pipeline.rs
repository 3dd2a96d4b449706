//=========================================================================
// Render Pipeline
//=========================================================================
//
// Ordered list of render callbacks owned by a scene.
//
// Each callback keeps its own data bag across frames. The bag starts out
// empty and is filled by the callback's initializer on its first
// invocation, exactly once; after that the callback receives the same
// data every frame together with an invocation counter and the time
// since its first invocation. Dropping the scene drops every bag.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::marker::PhantomData;

//=== Internal Dependencies ===============================================

use super::Frame;

//=== Invocation ==========================================================

/// Per-call view of a render callback's persistent state.
pub struct Invocation<'a, D> {
    /// Zero on the first call, incremented after every call.
    pub id: u64,

    /// Seconds since this callback was first invoked.
    pub elapsed: f64,

    /// The callback's persistent data.
    pub data: &'a mut D,
}

impl<D> Invocation<'_, D> {
    pub fn is_first(&self) -> bool {
        self.id == 0
    }
}

//=== RenderCallback ======================================================

trait RenderCallback<S>: Send {
    fn invoke(&mut self, scene: &mut S, frame: &mut Frame<'_>);
}

struct DataBag<D> {
    invocations: u64,
    started_at: f64,
    data: D,
}

struct RenderStage<S, D, I, R> {
    init: Option<I>,
    render: R,
    bag: Option<DataBag<D>>,
    _scene: PhantomData<fn(&mut S)>,
}

impl<S, D, I, R> RenderCallback<S> for RenderStage<S, D, I, R>
where
    D: Send,
    I: FnOnce(&S, &Frame<'_>) -> D + Send,
    R: FnMut(&mut S, &mut Frame<'_>, Invocation<'_, D>) + Send,
{
    fn invoke(&mut self, scene: &mut S, frame: &mut Frame<'_>) {
        if self.bag.is_none() {
            let Some(init) = self.init.take() else {
                return;
            };
            self.bag = Some(DataBag {
                invocations: 0,
                started_at: frame.time.elapsed,
                data: init(scene, frame),
            });
        }

        let Some(bag) = self.bag.as_mut() else {
            return;
        };

        let invocation = Invocation {
            id: bag.invocations,
            elapsed: frame.time.elapsed - bag.started_at,
            data: &mut bag.data,
        };
        (self.render)(scene, frame, invocation);
        bag.invocations += 1;
    }
}

//=== RenderPipeline ======================================================

/// Render callbacks for scene state `S`, invoked in registration order.
pub struct RenderPipeline<S> {
    stages: Vec<Box<dyn RenderCallback<S>>>,
}

impl<S: 'static> RenderPipeline<S> {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a callback with no persistent data.
    pub fn add_render_function<R>(&mut self, mut render: R)
    where
        R: FnMut(&mut S, &mut Frame<'_>) + Send + 'static,
    {
        self.add_render_function_with(
            |_: &S, _: &Frame<'_>| (),
            move |scene: &mut S, frame: &mut Frame<'_>, _: Invocation<'_, ()>| {
                render(scene, frame)
            },
        );
    }

    /// Registers a callback whose data bag is built by `init` on its first
    /// invocation.
    pub fn add_render_function_with<D, I, R>(&mut self, init: I, render: R)
    where
        D: Send + 'static,
        I: FnOnce(&S, &Frame<'_>) -> D + Send + 'static,
        R: FnMut(&mut S, &mut Frame<'_>, Invocation<'_, D>) + Send + 'static,
    {
        self.stages.push(Box::new(RenderStage {
            init: Some(init),
            render,
            bag: None,
            _scene: PhantomData,
        }));
    }

    //--- Dispatch ---------------------------------------------------------

    /// Invokes every registered callback once, in order.
    pub fn dispatch(&mut self, scene: &mut S, frame: &mut Frame<'_>) {
        for stage in &mut self.stages {
            stage.invoke(scene, frame);
        }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl<S: 'static> Default for RenderPipeline<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::core::time::TimeSample;
    use crate::core::viewport::Viewport;
    use crate::render::recording::RecordingCanvas;

    #[derive(Default)]
    struct Log {
        entries: Vec<String>,
        inits: u32,
    }

    fn run_frame(pipeline: &mut RenderPipeline<Log>, log: &mut Log, elapsed: f64) {
        let config = Config::default();
        let viewport = Viewport::from_window(200, 200, 20);
        let mut canvas = RecordingCanvas::default();
        let mut frame = Frame {
            time: TimeSample { elapsed, delta: 0.0 },
            viewport: &viewport,
            config: &config,
            canvas: &mut canvas,
        };
        pipeline.dispatch(log, &mut frame);
    }

    #[test]
    fn callbacks_run_in_registration_order() {
        let mut pipeline = RenderPipeline::new();
        pipeline.add_render_function(|log: &mut Log, _| log.entries.push("first".into()));
        pipeline.add_render_function(|log: &mut Log, _| log.entries.push("second".into()));
        assert_eq!(pipeline.len(), 2);

        let mut log = Log::default();
        run_frame(&mut pipeline, &mut log, 0.0);
        run_frame(&mut pipeline, &mut log, 0.1);

        assert_eq!(log.entries, ["first", "second", "first", "second"]);
    }

    #[test]
    fn data_bag_is_initialized_once_and_persists() {
        let mut pipeline = RenderPipeline::new();
        pipeline.add_render_function_with(
            |_: &Log, _: &Frame<'_>| 0u32,
            |log: &mut Log, _: &mut Frame<'_>, invocation: Invocation<'_, u32>| {
                if invocation.is_first() {
                    log.inits += 1;
                }
                *invocation.data += 1;
                log.entries.push(format!("{}:{}", invocation.id, invocation.data));
            },
        );

        let mut log = Log::default();
        for _ in 0..3 {
            run_frame(&mut pipeline, &mut log, 0.0);
        }

        assert_eq!(log.inits, 1);
        assert_eq!(log.entries, ["0:1", "1:2", "2:3"]);
    }

    #[test]
    fn invocation_elapsed_starts_at_first_call() {
        let mut pipeline = RenderPipeline::new();
        pipeline.add_render_function_with(
            |_: &Log, _: &Frame<'_>| (),
            |log: &mut Log, _: &mut Frame<'_>, invocation: Invocation<'_, ()>| {
                log.entries.push(format!("{:.1}", invocation.elapsed));
            },
        );

        let mut log = Log::default();
        run_frame(&mut pipeline, &mut log, 5.0);
        run_frame(&mut pipeline, &mut log, 5.5);

        assert_eq!(log.entries, ["0.0", "0.5"]);
    }

    #[test]
    fn each_callback_has_its_own_bag() {
        let mut pipeline = RenderPipeline::new();
        for label in ["a", "b"] {
            pipeline.add_render_function_with(
                move |_: &Log, _: &Frame<'_>| label.to_string(),
                |log: &mut Log, _: &mut Frame<'_>, invocation: Invocation<'_, String>| {
                    log.entries.push(invocation.data.clone());
                },
            );
        }

        let mut log = Log::default();
        run_frame(&mut pipeline, &mut log, 0.0);
        assert_eq!(log.entries, ["a", "b"]);
    }
}
