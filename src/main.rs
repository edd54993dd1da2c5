use anyhow::{Context, Result};
use linekit::args::OpName;
use linekit::{deduplicate_file, locale, logging, report, sort_file, styles, subtract_files};
use linekit::LineComparator;

fn main() -> Result<()> {
    let args = linekit::args::parsed();
    logging::init(args.verbosity);
    styles::init();

    let result = match args.op {
        OpName::Sort { file, order, locale: tag } => {
            let tag = locale::resolve(tag);
            let comparator = LineComparator::for_locale(tag.as_deref());
            sort_file(&file, order, &comparator, args.write_mode)
                .with_context(|| format!("Can't sort {}", file.display()))?
        }
        OpName::Dedup { file, keep_order } => deduplicate_file(&file, keep_order, args.write_mode)
            .with_context(|| format!("Can't deduplicate {}", file.display()))?,
        OpName::Subtract { main, filter } => subtract_files(&main, &filter, args.write_mode)
            .with_context(|| {
                format!("Can't subtract {} from {}", filter.display(), main.display())
            })?,
    };

    if args.verbosity >= 0 {
        println!("{}", report::summary(&result, styles::colored(args.color)));
    }
    Ok(())
}
