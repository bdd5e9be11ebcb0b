use flowseq::flow::{Flow, StopToken};
use flowseq::frame::{Frame, MemTable};
use flowseq::registry::Registry;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Eager chaining: everything below runs immediately.
    let squares = Flow::of(0..10).filter(|x| x % 2 == 0).map(|x| x * x);
    println!("even squares: {squares:?}");

    // Lazy pipeline: nothing runs until the terminal.
    let lazy = Flow::source((1..).map(|x| x * 3)).head(5);
    println!("before the terminal: {lazy:?}");
    println!("after the terminal:  {:?}", lazy.to_vec());

    // Containment: the division by zero costs one element, not the pipeline.
    // (The panic hook still fires, so expect one panic message on stderr.)
    let settled = Flow::of([0_i32, 1, 2, 3]).safe().map(|x| 12 / x);
    println!("with a hole: {settled:?}");

    // Windows.
    println!("batched: {:?}", Flow::of(0..7).batch(3)?);
    println!("rolling: {:?}", Flow::of(0..5).rolling(3)?);

    // Named steps via the registry.
    let mut registry = Registry::new();
    registry.register("add1", |x: i64| x + 1)?;
    registry.register("mul2", |x: i64| x * 2)?;
    let out = Flow::of(0..5_i64)
        .call("add1", &registry)?
        .call("mul2", &registry)?;
    println!("dispatched: {:?}", out.to_vec());

    // The same named steps, applied per column.
    let table = MemTable::new().with_column("a", vec![0_i64, 1, 2, 3, 4])?;
    let mut frame = Frame::new(table);
    frame
        .apply_into("add1", "a", "b", &registry)?
        .apply_into("mul2", "b", "c", &registry)?;
    println!("columns: {:?}", frame.store());

    // Bounding an unbounded source cooperatively.
    let token = StopToken::new();
    let handle = token.clone();
    let mut total = 0_i64;
    Flow::source(1_i64..).stop_when(token).subscribe(|item| {
        total += item.value();
        if total > 100 {
            handle.stop();
        }
    });
    println!("summed until the total passed 100: {total}");

    Ok(())
}
