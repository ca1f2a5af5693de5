use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use castwire_frame::{Frame, FrameBuffer, FrameConfig, HEADER_SIZE};

use crate::cmd::DecodeArgs;
use crate::exit::{frame_error, io_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::{print_frame, OutputFormat};

/// Default number of bytes handed to the reassembler per append.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    if args.count == Some(0) {
        return Err(CliError::new(USAGE, "--count must be greater than zero"));
    }

    let path = args.input.as_deref().filter(|path| *path != Path::new("-"));
    let source = path.map_or_else(|| "stdin".to_string(), |p| p.display().to_string());
    let input: Box<dyn Read> = match path {
        None => Box::new(std::io::stdin().lock()),
        Some(path) => Box::new(
            File::open(path)
                .map_err(|err| io_error(&format!("failed opening {}", path.display()), err))?,
        ),
    };

    let config = FrameConfig {
        max_payload_size: args.max_frame_size,
        high_water_mark: args.high_water_mark,
        ..FrameConfig::default()
    };
    let mut printed = 0usize;
    let limit = args.count;

    let leftover = decode_stream(input, args.chunk_size, config, |frame| {
        print_frame(&frame, printed, &source, format);
        printed += 1;
        limit.is_none_or(|count| printed < count)
    })?;

    if leftover > 0 && limit.is_none_or(|count| printed < count) {
        return Err(CliError::new(
            DATA_INVALID,
            format!("stream ended with {leftover} trailing byte(s) of an incomplete frame"),
        ));
    }
    tracing::debug!(frames = printed, "decode finished");

    Ok(SUCCESS)
}

/// Feed `input` to a [`FrameBuffer`] `chunk_size` bytes at a time, handing
/// each complete frame to `on_frame` until it returns `false` or the input
/// ends. Returns the number of unconsumed bytes left in the buffer.
fn decode_stream<R, F>(
    mut input: R,
    chunk_size: usize,
    config: FrameConfig,
    mut on_frame: F,
) -> CliResult<usize>
where
    R: Read,
    F: FnMut(Frame) -> bool,
{
    let largest = config
        .max_payload_size
        .saturating_add(HEADER_SIZE)
        .max(DEFAULT_CHUNK_SIZE);
    if chunk_size == 0 || chunk_size > largest {
        return Err(CliError::new(
            USAGE,
            format!("--chunk-size must be between 1 and {largest}"),
        ));
    }

    let mut buffer = FrameBuffer::with_config(config);
    let mut chunk = vec![0u8; chunk_size];

    loop {
        let read = match input.read(&mut chunk) {
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(io_error("read failed", err)),
        };
        if read == 0 {
            return Ok(buffer.remaining());
        }
        buffer.append(&chunk[..read]);

        while let Some(frame) = buffer
            .next_message()
            .map_err(|err| frame_error("decode failed", err))?
        {
            if !on_frame(frame) {
                return Ok(0);
            }
        }
    }
}
